//! Net present value and internal rate of return.

/// Default bisection iteration cap for [`irr`].
pub const IRR_MAX_ITERATIONS: usize = 100;

/// Default NPV tolerance for [`irr`].
pub const IRR_TOLERANCE: f64 = 1e-6;

/// Net present value of `cash_flows` at `rate`, flow `i` discounted by `(1 + rate)^i`.
///
/// # Examples
///
/// ```
/// use solar_roi_sim::sim::finance::npv;
///
/// assert_eq!(npv(0.0, &[-100.0, 60.0, 40.0]), 0.0);
/// assert!((npv(0.1, &[0.0, 110.0]) - 100.0).abs() < 1e-9);
/// ```
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(i, flow)| flow / (1.0 + rate).powi(i as i32))
        .sum()
}

/// Internal rate of return with the default iteration cap and tolerance.
///
/// See [`irr_with`].
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    irr_with(cash_flows, IRR_MAX_ITERATIONS, IRR_TOLERANCE)
}

/// Bisection search for the rate in `[0, 1]` where the NPV crosses zero.
///
/// Returns `None` when the series is empty, does not start with an outflow,
/// or no rate within the bracket brings `|NPV|` under `tolerance` in
/// `max_iterations` steps. `None` means the IRR is undefined for this series;
/// it is not an error.
pub fn irr_with(cash_flows: &[f64], max_iterations: usize, tolerance: f64) -> Option<f64> {
    match cash_flows.first() {
        Some(&initial) if initial < 0.0 => {}
        _ => return None,
    }

    let mut low = 0.0;
    let mut high = 1.0;
    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(mid, cash_flows);
        if npv_mid.abs() < tolerance {
            return Some(mid);
        }
        if npv(low, cash_flows) * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }
    None
}
