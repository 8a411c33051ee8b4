//! Reference values for the square-lattice ferromagnet (J = 1, h = 0)

/// Critical temperature, exact result
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269 J/k_B
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Theoretical magnetization at T=0 (all spins aligned)
pub fn magnetization_at_zero_temp() -> f64 {
    1.0
}

/// Theoretical energy per site at T=0 (all spins aligned)
pub fn energy_per_site_at_zero_temp() -> f64 {
    // Each spin has 4 aligned neighbors, E = -J * 4 / 2 = -2J per site
    -2.0
}
