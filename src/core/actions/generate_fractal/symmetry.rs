use crate::core::util::pixel_to_complex_coords::PlaneMapping;
use log::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowPlan {
    Compute,
    /// Copy of the given row reflected across the real axis.
    Mirror(u32),
}

fn all_computed(height: u32) -> Vec<RowPlan> {
    vec![RowPlan::Compute; height as usize]
}

/// Decides, row by row, what must be evaluated and what can be mirrored.
///
/// When the real axis falls inside the raster the larger side (the upper side
/// on ties, axis row included) is computed and row `y` on the other side
/// copies row `round(2 * axis) - y`. Rows whose reflection falls outside the
/// computed side are computed too.
#[must_use]
pub fn plan_rows(mapping: &PlaneMapping, height: u32) -> Vec<RowPlan> {
    let axis = mapping.real_axis_row();
    let axis_row = axis.round();

    if !axis_row.is_finite() || axis_row < 0.0 || axis_row >= f64::from(height) {
        debug!("symmetry: real axis outside the raster");
        return all_computed(height);
    }

    let axis_row = axis_row as i64;
    let height = i64::from(height);
    let reflection = (2.0 * axis).round() as i64;

    let rows_above = axis_row + 1;
    let rows_below = height - axis_row - 1;
    let computed = if rows_above >= rows_below {
        0..axis_row + 1
    } else {
        axis_row..height
    };

    let plan: Vec<RowPlan> = (0..height)
        .map(|y| {
            if computed.contains(&y) {
                return RowPlan::Compute;
            }

            let source = reflection - y;
            if computed.contains(&source) {
                RowPlan::Mirror(source as u32)
            } else {
                RowPlan::Compute
            }
        })
        .collect();

    debug!(
        "symmetry: axis row {axis_row}, {} of {height} rows mirrored",
        plan.iter().filter(|row| matches!(row, RowPlan::Mirror(_))).count()
    );

    plan
}
