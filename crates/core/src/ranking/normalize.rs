use super::NEUTRAL_SCORE;

/// Whether a larger raw value should score higher (RAM, battery) or lower
/// (price).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Min-max normalize one attribute column onto [0,1].
///
/// Unusable entries (missing or non-finite) are excluded from the min/max
/// range and then assigned [`NEUTRAL_SCORE`]. A column with no usable values,
/// or one where min equals max, yields the neutral score everywhere: a
/// constant feature carries no discriminating signal and must not invent one.
///
/// Ranges are derived solely from the column passed in, so scores are
/// comparative only within the current candidate set.
pub fn normalize_column(values: &[Option<f64>], direction: Direction) -> Vec<f64> {
    let usable: Vec<f64> =
        values.iter().filter_map(|value| value.filter(|v| v.is_finite())).collect();

    let (min, max) = match (
        usable.iter().copied().reduce(f64::min),
        usable.iter().copied().reduce(f64::max),
    ) {
        (Some(min), Some(max)) if !approx_equal(min, max) => (min, max),
        _ => return vec![NEUTRAL_SCORE; values.len()],
    };

    values
        .iter()
        .map(|value| match value.filter(|v| v.is_finite()) {
            Some(v) => {
                let scaled = (v - min) / (max - min);
                match direction {
                    Direction::HigherIsBetter => scaled,
                    Direction::LowerIsBetter => 1.0 - scaled,
                }
            }
            None => NEUTRAL_SCORE,
        })
        .collect()
}

fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
