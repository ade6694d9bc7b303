use vision_base::Size;

/// Pick the preview size to request from the camera.
///
/// Returns `desired` if the camera supports it exactly. Otherwise returns
/// the smallest-area size whose width and height both reach the smaller
/// desired dimension, or the first choice when no size is big enough.
/// Returns `None` only for an empty list.
pub fn choose_optimal_resolution(choices: &[Size], desired: Size) -> Option<Size> {
    let min_dimension = desired.min_dimension();

    let mut smallest: Option<Size> = None;
    for &option in choices {
        if option == desired {
            return Some(desired);
        }
        if option.width >= min_dimension && option.height >= min_dimension {
            // strict comparison keeps the earliest on ties
            if smallest.is_none_or(|best| option.area() < best.area()) {
                smallest = Some(option);
            }
        }
    }

    smallest.or_else(|| choices.first().copied())
}
