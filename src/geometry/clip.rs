use crate::scale::PlotArea;

use super::types::ClipRect;

/// Plot area as-is. Boxes and points clip here.
pub(super) fn plot_area(area: &PlotArea) -> ClipRect {
    ClipRect {
        x1: area.left,
        y1: area.top,
        x2: area.right,
        y2: area.bottom,
    }
}

/// Plot area widened horizontally by the extend pair: the first entry
/// is subtracted from the left edge, the second added to the right.
pub(super) fn extended(area: &PlotArea, extend: [f32; 2]) -> ClipRect {
    ClipRect {
        x1: area.left - extend[0],
        y1: area.top,
        x2: area.right + extend[1],
        y2: area.bottom,
    }
}

/// Plot area shifted whole by the signed paddings. Arrows clip here so
/// the shifted span stays visible.
pub(super) fn shifted(area: &PlotArea, dx: f32, dy: f32) -> ClipRect {
    ClipRect {
        x1: area.left + dx,
        y1: area.top + dy,
        x2: area.right + dx,
        y2: area.bottom + dy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_widens_only_the_x_axis() {
        let area = PlotArea::new(10.0, 0.0, 110.0, 50.0);
        let clip = extended(&area, [4.0, 6.0]);
        assert_eq!(clip.x1, 6.0);
        assert_eq!(clip.x2, 116.0);
        assert_eq!(clip.y1, 0.0);
        assert_eq!(clip.y2, 50.0);
    }

    #[test]
    fn shift_moves_both_edges_of_an_axis() {
        let area = PlotArea::new(0.0, 0.0, 100.0, 50.0);
        let clip = shifted(&area, -8.0, 3.0);
        assert_eq!(clip.x1, -8.0);
        assert_eq!(clip.x2, 92.0);
        assert_eq!(clip.y1, 3.0);
        assert_eq!(clip.y2, 53.0);
        assert_eq!(clip.width(), area.width());
    }
}
