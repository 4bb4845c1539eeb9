//! Element - immutable layout tree for one frame
//!
//! Panels build a tree of elements from a machine snapshot; the compositor
//! measures it, paints it onto a [`Canvas`] and throws it away. Nothing is
//! retained between frames.
//!
//! ```text
//! vbox
//! ├── border(registers)
//! └── hbox (flex)
//!     ├── border(instructions) (flex)
//!     ├── vbox [data, sse, fpu]
//!     └── border(stack) (width 15)
//! ```

use unicode_width::UnicodeWidthStr;

use super::canvas::Canvas;

/// Size in cells
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Screen area in cells
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Overlap of two rects (empty if disjoint)
    fn intersect(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// Shrink by `sides`, clamping at zero
    fn inset(&self, sides: Sides) -> Rect {
        let x = self.x.saturating_add(sides.left);
        let y = self.y.saturating_add(sides.top);
        Rect {
            x,
            y,
            width: self.width.saturating_sub(sides.left + sides.right),
            height: self.height.saturating_sub(sides.top + sides.bottom),
        }
    }
}

/// Padding amounts
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same amount left and right, nothing above or below
    pub const fn horizontal(n: u16) -> Self {
        Self::new(0, n, 0, n)
    }

    /// `vertical` above and below, `horizontal` left and right
    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// Axis along which a container lays out its children
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Inherited paint state
#[derive(Clone, Copy, Debug)]
struct Paint {
    dim: bool,
    axis: Axis,
}

/// Border characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// Layout node
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A single line of text
    Text(String),
    /// Children stacked top to bottom
    VBox(Vec<Element>),
    /// Children placed left to right
    HBox(Vec<Element>),
    /// A line across the parent's cross axis
    Separator,
    /// Single-line box around the child
    Border(Box<Element>),
    Padding { child: Box<Element>, sides: Sides },
    /// Exact width, never grows
    Width { child: Box<Element>, width: u16 },
    /// Exact height, never grows
    Height { child: Box<Element>, height: u16 },
    /// Takes a share of any surplus space in the parent
    Flex(Box<Element>),
    /// Paint all text below in the dim color
    Dim(Box<Element>),
    /// Push the child against the right edge of its area
    AlignRight(Box<Element>),
}

pub fn text(content: impl Into<String>) -> Element {
    Element::Text(content.into())
}

pub fn vbox(children: Vec<Element>) -> Element {
    Element::VBox(children)
}

pub fn hbox(children: Vec<Element>) -> Element {
    Element::HBox(children)
}

pub fn separator() -> Element {
    Element::Separator
}

impl Element {
    pub fn border(self) -> Self {
        Element::Border(Box::new(self))
    }

    /// One or more blank columns on each side
    pub fn padding(self, n: u16) -> Self {
        self.padding_sides(Sides::horizontal(n))
    }

    pub fn padding_sides(self, sides: Sides) -> Self {
        Element::Padding {
            child: Box::new(self),
            sides,
        }
    }

    pub fn width(self, width: u16) -> Self {
        Element::Width {
            child: Box::new(self),
            width,
        }
    }

    pub fn height(self, height: u16) -> Self {
        Element::Height {
            child: Box::new(self),
            height,
        }
    }

    pub fn flex(self) -> Self {
        Element::Flex(Box::new(self))
    }

    pub fn dim(self) -> Self {
        Element::Dim(Box::new(self))
    }

    pub fn align_right(self) -> Self {
        Element::AlignRight(Box::new(self))
    }

    /// Natural size: the smallest area that shows everything unclipped
    pub fn measure(&self) -> Size {
        match self {
            Element::Text(s) => Size {
                width: u16::try_from(s.width()).unwrap_or(u16::MAX),
                height: 1,
            },
            Element::VBox(children) => children.iter().fold(Size::default(), |acc, c| {
                let m = c.measure();
                Size {
                    width: acc.width.max(m.width),
                    height: acc.height.saturating_add(m.height),
                }
            }),
            Element::HBox(children) => children.iter().fold(Size::default(), |acc, c| {
                let m = c.measure();
                Size {
                    width: acc.width.saturating_add(m.width),
                    height: acc.height.max(m.height),
                }
            }),
            Element::Separator => Size { width: 1, height: 1 },
            Element::Border(child) => {
                let m = child.measure();
                Size {
                    width: m.width.saturating_add(2),
                    height: m.height.saturating_add(2),
                }
            }
            Element::Padding { child, sides } => {
                let m = child.measure();
                Size {
                    width: m.width.saturating_add(sides.left + sides.right),
                    height: m.height.saturating_add(sides.top + sides.bottom),
                }
            }
            Element::Width { child, width } => Size {
                width: *width,
                height: child.measure().height,
            },
            Element::Height { child, height } => Size {
                width: child.measure().width,
                height: *height,
            },
            Element::Flex(child) | Element::Dim(child) | Element::AlignRight(child) => {
                child.measure()
            }
        }
    }

    /// Whether this element takes part in surplus distribution
    pub fn is_flex(&self) -> bool {
        match self {
            Element::Flex(_) => true,
            Element::Border(child)
            | Element::Dim(child)
            | Element::AlignRight(child)
            | Element::Padding { child, .. } => child.is_flex(),
            _ => false,
        }
    }

    /// Paint the tree into `area` of `canvas`
    pub fn render(&self, canvas: &mut Canvas, area: Rect) {
        self.paint(
            canvas,
            area,
            Paint {
                dim: false,
                axis: Axis::Vertical,
            },
        );
    }

    fn paint(&self, canvas: &mut Canvas, area: Rect, paint: Paint) {
        if area.is_empty() {
            return;
        }

        match self {
            Element::Text(s) => canvas.put_str(area, s, paint.dim),
            Element::VBox(children) => {
                let natural: Vec<u16> = children.iter().map(|c| c.measure().height).collect();
                let flex: Vec<bool> = children.iter().map(Element::is_flex).collect();
                let heights = distribute(area.height, &natural, &flex);

                let mut y = area.y;
                let child_paint = Paint { axis: Axis::Vertical, ..paint };
                for (child, h) in children.iter().zip(heights) {
                    let rect = Rect::new(area.x, y, area.width, h).intersect(area);
                    child.paint(canvas, rect, child_paint);
                    y = y.saturating_add(h);
                }
            }
            Element::HBox(children) => {
                let natural: Vec<u16> = children.iter().map(|c| c.measure().width).collect();
                let flex: Vec<bool> = children.iter().map(Element::is_flex).collect();
                let widths = distribute(area.width, &natural, &flex);

                let mut x = area.x;
                let child_paint = Paint { axis: Axis::Horizontal, ..paint };
                for (child, w) in children.iter().zip(widths) {
                    let rect = Rect::new(x, area.y, w, area.height).intersect(area);
                    child.paint(canvas, rect, child_paint);
                    x = x.saturating_add(w);
                }
            }
            Element::Separator => {
                let chars = BorderChars::single();
                match paint.axis {
                    // Inside an hbox: a vertical rule
                    Axis::Horizontal => {
                        for y in area.y..area.bottom() {
                            canvas.put_char(area.x, y, chars.vertical, false);
                        }
                    }
                    Axis::Vertical => {
                        for x in area.x..area.right() {
                            canvas.put_char(x, area.y, chars.horizontal, false);
                        }
                    }
                }
            }
            Element::Border(child) => {
                draw_border(canvas, area);
                child.paint(canvas, area.inset(Sides::new(1, 1, 1, 1)), paint);
            }
            Element::Padding { child, sides } => child.paint(canvas, area.inset(*sides), paint),
            Element::Width { child, width } => {
                let rect = Rect { width: area.width.min(*width), ..area };
                child.paint(canvas, rect, paint);
            }
            Element::Height { child, height } => {
                let rect = Rect { height: area.height.min(*height), ..area };
                child.paint(canvas, rect, paint);
            }
            Element::Flex(child) => child.paint(canvas, area, paint),
            Element::Dim(child) => child.paint(canvas, area, Paint { dim: true, ..paint }),
            Element::AlignRight(child) => {
                let w = child.measure().width.min(area.width);
                let rect = Rect {
                    x: area.x + (area.width - w),
                    width: w,
                    ..area
                };
                child.paint(canvas, rect, paint);
            }
        }
    }
}

/// Draw a single-line box on the edge of `area`
fn draw_border(canvas: &mut Canvas, area: Rect) {
    let chars = BorderChars::single();
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    for x in area.x..=right {
        canvas.put_char(x, area.y, chars.horizontal, false);
        if area.height > 1 {
            canvas.put_char(x, bottom, chars.horizontal, false);
        }
    }
    for y in area.y..=bottom {
        canvas.put_char(area.x, y, chars.vertical, false);
        if area.width > 1 {
            canvas.put_char(right, y, chars.vertical, false);
        }
    }

    if area.width > 1 && area.height > 1 {
        canvas.put_char(area.x, area.y, chars.top_left, false);
        canvas.put_char(right, area.y, chars.top_right, false);
        canvas.put_char(area.x, bottom, chars.bottom_left, false);
        canvas.put_char(right, bottom, chars.bottom_right, false);
    }
}

/// Split `available` cells between children along one axis.
///
/// Surplus goes to flex children in equal shares (leftmost first for the
/// remainder). A deficit is taken from flex children; whatever is still
/// missing after that gets clipped by the parent.
fn distribute(available: u16, natural: &[u16], flex: &[bool]) -> Vec<u16> {
    let total: u32 = natural.iter().map(|&n| u32::from(n)).sum();
    let flex_count = flex.iter().filter(|&&f| f).count() as u32;
    let mut sizes = natural.to_vec();

    if flex_count == 0 {
        return sizes;
    }

    let available = u32::from(available);
    if total <= available {
        let surplus = available - total;
        let share = surplus / flex_count;
        let mut remainder = surplus % flex_count;
        for (size, _) in sizes.iter_mut().zip(flex).filter(|&(_, &f)| f) {
            let extra = share + u32::from(remainder > 0);
            remainder = remainder.saturating_sub(1);
            *size = u16::try_from(u32::from(*size) + extra).unwrap_or(u16::MAX);
        }
    } else {
        let deficit = total - available;
        let share = u16::try_from((deficit + flex_count - 1) / flex_count).unwrap_or(u16::MAX);
        for (size, _) in sizes.iter_mut().zip(flex).filter(|&(_, &f)| f) {
            *size = size.saturating_sub(share);
        }
    }

    sizes
}
