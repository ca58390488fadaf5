//! Carousel rendering — draws the cards that intersect the viewport.
//!
//! Card geometry comes straight from the [`Track`] in pixels and is mapped
//! to columns with `px_per_cell`.  Cards partly outside the pane are drawn
//! into a scratch buffer first and blitted column by column, so their
//! borders stay where they belong instead of collapsing onto the pane edge.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use super::magnify::Magnifier;
use super::theme::Theme;
use crate::core::reviews::Review;
use crate::core::surface::Surface;
use crate::core::track::Track;

/// Rows a fully magnified card grows by.
pub const MAX_EXTRA_ROWS: u16 = 2;

pub struct CarouselWidget<'a> {
    track: &'a Track,
    reviews: &'a [Review],
    magnifier: &'a Magnifier,
    px_per_cell: f64,
    block: Option<Block<'a>>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(
        track: &'a Track,
        reviews: &'a [Review],
        magnifier: &'a Magnifier,
        px_per_cell: f64,
    ) -> Self {
        Self {
            track,
            reviews,
            magnifier,
            px_per_cell,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height < 4 || self.px_per_cell <= 0.0 {
            return;
        }

        let base_h = inner.height.saturating_sub(MAX_EXTRA_ROWS);
        let pane_w = i32::from(inner.width);

        for index in 0..self.track.item_count() {
            let Some(bounds) = self.track.item_bounds(index) else {
                continue;
            };
            let left = (bounds.left / self.px_per_cell).round() as i32;
            let width = (bounds.width / self.px_per_cell).round() as i32;
            if width <= 0 || left + width <= 0 || left >= pane_w {
                continue;
            }
            let Some(review) = self.reviews.get(self.track.source_index(index)) else {
                continue;
            };

            let height = (base_h + self.magnifier.extra_rows(index, MAX_EXTRA_ROWS))
                .min(inner.height);
            let top = inner.y + (inner.height - height) / 2;
            let card = Rect::new(0, 0, width as u16, height);
            let mut scratch = Buffer::empty(card);
            render_card(review, self.magnifier.level(index) >= 0.5, card, &mut scratch);

            for cx in 0..width {
                let col = left + cx;
                if !(0..pane_w).contains(&col) {
                    continue;
                }
                for cy in 0..height {
                    let src = scratch.cell((cx as u16, cy));
                    let dst = buf.cell_mut((inner.x + col as u16, top + cy));
                    if let (Some(src), Some(dst)) = (src, dst) {
                        *dst = src.clone();
                    }
                }
            }
        }
    }
}

fn render_card(review: &Review, magnified: bool, area: Rect, buf: &mut Buffer) {
    let (border_type, border_style) = if magnified {
        (BorderType::Double, Theme::active_card_border_style())
    } else {
        (BorderType::Rounded, Theme::card_border_style())
    };
    let block = Block::bordered()
        .border_type(border_type)
        .border_style(border_style);

    let lines = vec![
        Line::from(Span::styled(review.author.clone(), Theme::author_style())),
        Line::from(Span::styled(review.vehicle.clone(), Theme::vehicle_style())),
        Line::from(vec![
            Span::styled(review.stars(), Theme::stars_style()),
            Span::raw("  "),
            Span::styled(review.date_label(), Theme::muted_style()),
        ]),
        Line::default(),
        Line::from(Span::styled(review.text.clone(), Theme::body_style())),
    ];

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// Position indicator, one dot per review: `○ ● ○ ○`.
pub fn dots(active: Option<usize>, count: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(count * 2 + 1);
    spans.push(Span::raw(" "));
    for i in 0..count {
        let on = Some(i) == active;
        spans.push(Span::styled(if on { "●" } else { "○" }, Theme::dot_style(on)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
