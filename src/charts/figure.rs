//! Figure Module
//! Turns a [`ChartSpec`] into a backend-independent bar chart scene.
//!
//! Layout:
//! 1. Title: "Papers by People Using LibMesh, (N Total)" centered at the top
//! 2. Axes box using the usual subplot margins of a 6.4 x 4.8 in figure
//! 3. One bar per year, x ticks on every other year, outward tick marks
//!
//! All geometry is in typographic points (1/72 in), origin at the top-left
//! corner of the figure, y growing downwards. Backends only scale and flip.

use crate::data::ChartSpec;

/// Plain RGB color, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Rendering constants for the citations chart.
pub struct FigureStyle;

impl FigureStyle {
    pub const WIDTH_PT: f64 = 6.4 * 72.0;
    pub const HEIGHT_PT: f64 = 4.8 * 72.0;
    // Subplot margins as fractions of the figure
    const LEFT: f64 = 0.125;
    const RIGHT: f64 = 0.9;
    const BOTTOM: f64 = 0.11;
    const TOP: f64 = 0.88;
    const TITLE_Y: f64 = 0.98;

    pub const BAR_WIDTH: f64 = 0.8;
    // sns.color_palette("muted") blue
    pub const BAR_COLOR: Rgb = Rgb(0x48, 0x78, 0xcf);

    const TITLE_FONT_SIZE: f64 = 12.0;
    const TICK_FONT_SIZE: f64 = 10.0;
    const TICK_LENGTH: f64 = 3.5;
    const TICK_PAD: f64 = 3.5;
    const LINE_WIDTH: f64 = 0.8;

    const Y_MARGIN: f64 = 0.05;
    const Y_TARGET_STEPS: usize = 6;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub center: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_lim: (f64, f64),
    pub y_lim: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub ticks_outward: bool,
}

/// In-memory chart, alive only until it is exported.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_pt: f64,
    pub height_pt: f64,
    pub title: String,
    pub bars: Vec<Bar>,
    pub bar_color: Rgb,
    pub axes: Axes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
}

/// Drawing primitive in figure points, consumed by the backends.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Rgb,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        h_align: HAlign,
        v_align: VAlign,
    },
}

/// Chart title for the given total.
pub fn title_for(total: u64) -> String {
    format!("Papers by People Using LibMesh, ({} Total)", total)
}

/// Build the bar chart for `spec`. Pure: equal specs give equal figures.
pub fn render(spec: &ChartSpec) -> Figure {
    let n = spec.len();

    let bars = spec
        .positions
        .iter()
        .zip(&spec.counts)
        .map(|(&pos, &count)| Bar {
            center: f64::from(pos),
            width: FigureStyle::BAR_WIDTH,
            height: count as f64,
        })
        .collect();

    // Every other position, starting with the first
    let x_ticks = spec
        .positions
        .iter()
        .zip(&spec.labels)
        .step_by(2)
        .map(|(&pos, label)| Tick {
            position: f64::from(pos),
            label: label.clone(),
        })
        .collect();

    let y_top = match spec.max_count() {
        0 => 1.0,
        max => max as f64 * (1.0 + FigureStyle::Y_MARGIN),
    };

    Figure {
        width_pt: FigureStyle::WIDTH_PT,
        height_pt: FigureStyle::HEIGHT_PT,
        title: title_for(spec.total),
        bars,
        bar_color: FigureStyle::BAR_COLOR,
        axes: Axes {
            x_lim: (0.0, n as f64 + 1.0),
            y_lim: (0.0, y_top),
            x_ticks,
            y_ticks: y_ticks(y_top),
            ticks_outward: true,
        },
    }
}

fn y_ticks(y_top: f64) -> Vec<Tick> {
    let step = nice_step(y_top, FigureStyle::Y_TARGET_STEPS);
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|&v| v <= y_top + step * 1e-9)
        .map(|v| Tick {
            position: v,
            label: format!("{:.0}", v),
        })
        .collect()
}

fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    // counts are integers
    (nice * magnitude).max(1.0)
}

/// Axes box in figure points: (left, top, right, bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Figure {
    pub fn axes_box(&self) -> AxesBox {
        AxesBox {
            left: self.width_pt * FigureStyle::LEFT,
            top: self.height_pt * (1.0 - FigureStyle::TOP),
            right: self.width_pt * FigureStyle::RIGHT,
            bottom: self.height_pt * (1.0 - FigureStyle::BOTTOM),
        }
    }

    fn map_x(&self, val: f64, area: &AxesBox) -> f64 {
        let (x_min, x_max) = self.axes.x_lim;
        area.left + (val - x_min) / (x_max - x_min) * (area.right - area.left)
    }

    fn map_y(&self, val: f64, area: &AxesBox) -> f64 {
        let (y_min, y_max) = self.axes.y_lim;
        area.bottom - (val - y_min) / (y_max - y_min) * (area.bottom - area.top)
    }

    /// Lower the figure to drawing primitives, back to front.
    pub fn marks(&self) -> Vec<Mark> {
        let area = self.axes_box();
        let mut marks = Vec::with_capacity(self.bars.len() + 4 * self.axes.x_ticks.len() + 8);

        for bar in &self.bars {
            let x0 = self.map_x(bar.center - bar.width / 2.0, &area);
            let x1 = self.map_x(bar.center + bar.width / 2.0, &area);
            let y0 = self.map_y(bar.height, &area);
            let y1 = self.map_y(0.0, &area);
            marks.push(Mark::Rect {
                x: x0,
                y: y0,
                w: x1 - x0,
                h: y1 - y0,
                fill: self.bar_color,
            });
        }

        let spine = |from, to| Mark::Line {
            from,
            to,
            width: FigureStyle::LINE_WIDTH,
            color: BLACK,
        };
        marks.push(spine((area.left, area.top), (area.right, area.top)));
        marks.push(spine((area.right, area.top), (area.right, area.bottom)));
        marks.push(spine((area.right, area.bottom), (area.left, area.bottom)));
        marks.push(spine((area.left, area.bottom), (area.left, area.top)));

        let tick_len = if self.axes.ticks_outward {
            FigureStyle::TICK_LENGTH
        } else {
            -FigureStyle::TICK_LENGTH
        };
        let label_gap = tick_len.max(0.0) + FigureStyle::TICK_PAD;

        for tick in &self.axes.x_ticks {
            let x = self.map_x(tick.position, &area);
            marks.push(spine((x, area.bottom), (x, area.bottom + tick_len)));
            marks.push(Mark::Text {
                x,
                y: area.bottom + label_gap,
                text: tick.label.clone(),
                size: FigureStyle::TICK_FONT_SIZE,
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            });
        }

        for tick in &self.axes.y_ticks {
            let y = self.map_y(tick.position, &area);
            marks.push(spine((area.left - tick_len, y), (area.left, y)));
            marks.push(Mark::Text {
                x: area.left - label_gap,
                y,
                text: tick.label.clone(),
                size: FigureStyle::TICK_FONT_SIZE,
                h_align: HAlign::Right,
                v_align: VAlign::Middle,
            });
        }

        marks.push(Mark::Text {
            x: self.width_pt / 2.0,
            y: self.height_pt * (1.0 - FigureStyle::TITLE_Y),
            text: self.title.clone(),
            size: FigureStyle::TITLE_FONT_SIZE,
            h_align: HAlign::Center,
            v_align: VAlign::Top,
        });

        marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{derive, Cell, YearCount, LIBMESH_CITATIONS};
    use Cell::{Count, Label};

    fn small_spec() -> ChartSpec {
        let cells = [Label("a"), Count(3), Label("b"), Count(5)];
        derive(YearCount::new(&cells)).unwrap()
    }

    #[test]
    fn renders_two_bar_chart() {
        let fig = render(&small_spec());
        assert_eq!(fig.title, "Papers by People Using LibMesh, (8 Total)");
        assert_eq!(fig.axes.x_lim, (0.0, 3.0));
        assert_eq!(
            fig.bars,
            vec![
                Bar { center: 1.0, width: 0.8, height: 3.0 },
                Bar { center: 2.0, width: 0.8, height: 5.0 },
            ]
        );
        assert_eq!(
            fig.axes.x_ticks,
            vec![Tick { position: 1.0, label: "a".to_string() }]
        );
        assert!(fig.axes.ticks_outward);
        assert_eq!(fig.bar_color, Rgb(0x48, 0x78, 0xcf));
    }

    #[test]
    fn ticks_every_other_year() {
        let spec = derive(LIBMESH_CITATIONS).unwrap();
        let fig = render(&spec);
        let positions: Vec<f64> = fig.axes.x_ticks.iter().map(|t| t.position).collect();
        let labels: Vec<&str> = fig.axes.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(positions, vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0, 21.0]);
        assert_eq!(
            labels,
            vec!["'04", "'06", "'08", "'10", "'12", "'14", "'16", "'18", "'20", "'22", "'24"]
        );
        assert_eq!(fig.axes.x_lim, (0.0, 23.0));
        assert_eq!(fig.title, "Papers by People Using LibMesh, (2235 Total)");
    }

    #[test]
    fn odd_entry_count_ticks_last_label() {
        let cells = [Label("x"), Count(1), Label("y"), Count(2), Label("z"), Count(3)];
        let fig = render(&derive(YearCount::new(&cells)).unwrap());
        let labels: Vec<&str> = fig.axes.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["x", "z"]);
        assert_eq!(fig.axes.x_lim, (0.0, 4.0));
    }

    #[test]
    fn render_is_pure() {
        let spec = derive(LIBMESH_CITATIONS).unwrap();
        assert_eq!(render(&spec), render(&spec));
        assert_eq!(render(&spec).marks(), render(&spec).marks());
    }

    #[test]
    fn y_axis_covers_tallest_bar() {
        let fig = render(&derive(LIBMESH_CITATIONS).unwrap());
        let (y_min, y_max) = fig.axes.y_lim;
        assert_eq!(y_min, 0.0);
        assert!(y_max >= 243.0);
        let labels: Vec<&str> = fig.axes.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "50", "100", "150", "200", "250"]);
    }

    #[test]
    fn empty_chart_still_has_axes() {
        let fig = render(&derive(YearCount::new(&[])).unwrap());
        assert!(fig.bars.is_empty());
        assert!(fig.axes.x_ticks.is_empty());
        assert_eq!(fig.axes.x_lim, (0.0, 1.0));
        assert_eq!(fig.axes.y_lim, (0.0, 1.0));
        assert_eq!(fig.title, "Papers by People Using LibMesh, (0 Total)");
    }

    #[test]
    fn bars_sit_on_the_axes_floor() {
        let fig = render(&small_spec());
        let area = fig.axes_box();
        let rects: Vec<(f64, f64, f64, f64)> = fig
            .marks()
            .into_iter()
            .filter_map(|m| match m {
                Mark::Rect { x, y, w, h, .. } => Some((x, y, w, h)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        for (x, y, w, h) in &rects {
            assert!((y + h - area.bottom).abs() < 1e-9);
            assert!(*x > area.left && x + w < area.right);
        }
        // taller bar reaches higher
        assert!(rects[1].1 < rects[0].1);
    }

    #[test]
    fn outward_ticks_hang_below_the_axes() {
        let fig = render(&small_spec());
        let area = fig.axes_box();
        let below = fig.marks().into_iter().any(|m| {
            matches!(m, Mark::Line { from, to, .. }
                if from.1 == area.bottom && to.1 > area.bottom && from.0 == to.0)
        });
        assert!(below);
    }

    #[test]
    fn nice_step_rounds_to_1_2_5() {
        assert_eq!(nice_step(255.15, 5), 100.0);
        assert_eq!(nice_step(255.15, 6), 50.0);
        assert_eq!(nice_step(8.4, 5), 2.0);
        assert_eq!(nice_step(1.0, 5), 1.0);
    }
}
