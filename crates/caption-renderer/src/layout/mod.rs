//! Line layout: width equalization, vertical stacking and word placement
//!
//! Lines of a group are scaled so they occupy comparable widths: each line's
//! font grows or shrinks until its single-line width matches the widest line,
//! unless that would push the font past the size cap. The scaled lines are
//! then wrapped into the caption container and stacked top to bottom.

use crate::metrics::{wrap_words, TextMeasurer};
use crate::plugin::LayoutPolicy;
use crate::utils::RenderError;
use crate::variants::TextAlign;
use caption_core::{AnimationType, Group, SubtitleStyleConfig};

/// Largest scaled font size a line may reach, in pixels
pub const MAX_FONT_SIZE: f32 = 100.0;

/// Vertical gap between stacked lines, in pixels
pub const LINE_SPACING: f32 = 0.0;

/// Inputs that shape a group layout besides the group and style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Width lines wrap into
    pub container_width: f32,
    /// Font size cap
    pub max_font_size: f32,
    /// Gap between lines
    pub line_spacing: f32,
    /// Row alignment inside the container
    pub align: TextAlign,
}

impl LayoutParams {
    /// Default parameters for a container `container_width` pixels wide
    pub fn new(container_width: f32) -> Self {
        Self {
            container_width,
            max_font_size: MAX_FONT_SIZE,
            line_spacing: LINE_SPACING,
            align: TextAlign::Center,
        }
    }
}

/// Where a word sits inside its line box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPlacement {
    /// Horizontal center, relative to the container's left edge
    pub x_center: f32,
    /// Top of the word's row, relative to the line's top
    pub y: f32,
    /// Scaled word width
    pub width: f32,
}

/// Static layout of one line
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Distance from the top of the group to the top of this line
    pub offset_y: f32,
    /// Multiplier applied to the line's base font size
    pub font_scale: f32,
    /// Base font size times `font_scale`
    pub font_size: f32,
    /// Unscaled single-line width
    pub raw_width: f32,
    /// Wrapped height at the scaled size
    pub height: f32,
    /// One placement per word
    pub words: Vec<WordPlacement>,
}

/// Static layout of a group, computed once and reused for every frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupLayout {
    /// One entry per line, in line order
    pub lines: Vec<LineLayout>,
    /// Entrance archetype per line
    pub animations: Vec<AnimationType>,
}

impl GroupLayout {
    /// Layout that renders nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Vertical offset of every line
    pub fn offsets(&self) -> Vec<f32> {
        self.lines.iter().map(|line| line.offset_y).collect()
    }

    /// Font scale of every line
    pub fn font_scales(&self) -> Vec<f32> {
        self.lines.iter().map(|line| line.font_scale).collect()
    }

    /// Height of the whole stack
    pub fn total_height(&self) -> f32 {
        self.lines
            .last()
            .map_or(0.0, |line| line.offset_y + line.height)
    }
}

/// Per-line scale that equalizes widths: `max / width`, falling back to 1 for
/// zero-width lines and to `max_font_size / font_size` when the scaled size
/// would exceed the cap.
pub fn compute_line_scales(widths: &[f32], font_sizes: &[f32], max_font_size: f32) -> Vec<f32> {
    let max_width = widths.iter().copied().fold(0.0f32, f32::max);
    widths
        .iter()
        .zip(font_sizes)
        .map(|(&width, &font_size)| {
            let raw_scale = if width > 0.0 { max_width / width } else { 1.0 };
            if font_size * raw_scale > max_font_size {
                max_font_size / font_size
            } else {
                raw_scale
            }
        })
        .collect()
}

/// Scaled font size; a scale equal to the cap scale reports the cap exactly
pub fn scaled_font_size(font_size: f32, font_scale: f32, max_font_size: f32) -> f32 {
    if font_size > 0.0 && font_scale == max_font_size / font_size {
        max_font_size
    } else {
        font_size * font_scale
    }
}

/// Measure, scale, wrap and stack every line of `group`.
///
/// `policy` may replace the computed scales and the seeded animation
/// assignment; anything it declines falls back to the built-in behaviour.
pub fn layout_group<M: TextMeasurer + ?Sized>(
    group: &Group,
    style: &SubtitleStyleConfig,
    measurer: &M,
    params: &LayoutParams,
    policy: Option<&dyn LayoutPolicy>,
) -> Result<GroupLayout, RenderError> {
    if group.lines.is_empty() {
        return Ok(GroupLayout::empty());
    }

    let fonts: Vec<_> = group
        .lines
        .iter()
        .map(|line| style.fonts.get(line.font_type))
        .collect();
    let raw_widths = group
        .lines
        .iter()
        .zip(&fonts)
        .map(|(line, font)| measurer.measure_width(&line.text(), font))
        .collect::<Result<Vec<_>, _>>()?;
    let font_sizes: Vec<f32> = fonts.iter().map(|font| font.font_size).collect();

    let scales = match policy.and_then(|p| p.font_scales(group, style, &raw_widths)) {
        Some(scales) if scales.len() == group.lines.len() => scales,
        Some(scales) => {
            return Err(RenderError::LayoutError(format!(
                "layout policy returned {} scales for {} lines",
                scales.len(),
                group.lines.len()
            )))
        }
        None => compute_line_scales(&raw_widths, &font_sizes, params.max_font_size),
    };

    let mut lines = Vec::with_capacity(group.lines.len());
    let mut offset_y = 0.0f32;
    for (index, line) in group.lines.iter().enumerate() {
        let font = fonts[index];
        let font_scale = scales[index];
        let texts: Vec<&str> = line.words.iter().map(|word| word.text.as_str()).collect();
        let wrapped = wrap_words(measurer, &texts, font, params.container_width, font_scale)?;

        let mut words = Vec::with_capacity(texts.len());
        for (row_index, row) in wrapped.rows.iter().enumerate() {
            let mut x = match params.align {
                TextAlign::Center => (params.container_width - row.width) / 2.0,
                TextAlign::Left => 0.0,
            };
            let y = row_index as f32 * wrapped.row_height;
            for word_index in row.first_word..row.first_word + row.word_count {
                let width = wrapped.word_widths[word_index];
                words.push(WordPlacement {
                    x_center: x + width / 2.0,
                    y,
                    width,
                });
                x += width + wrapped.space_width;
            }
        }

        let height = wrapped.height();
        lines.push(LineLayout {
            offset_y,
            font_scale,
            font_size: scaled_font_size(font.font_size, font_scale, params.max_font_size),
            raw_width: raw_widths[index],
            height,
            words,
        });
        offset_y += height + params.line_spacing;
    }

    let animations = crate::animation::assign_for_group(group, style, policy)?;
    Ok(GroupLayout { lines, animations })
}
