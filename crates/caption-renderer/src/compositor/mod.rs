//! Frame compositor
//!
//! Turns a frame number into the list of words to paint. Everything that does
//! not depend on the frame (measurement, scaling, wrapping, animation
//! assignment) lives in a cached [`GroupLayout`]; what remains per frame is a
//! handful of spring evaluations per visible word.

mod primitives;

pub use primitives::{FontSpec, FrameState, WordPrimitive};

use crate::animation::{word_visual, WordTiming};
use crate::cache::LayoutKey;
use crate::layout::{layout_group, GroupLayout, LayoutParams};
use crate::metrics::LINE_HEIGHT;
use crate::renderer::RenderContext;
use crate::sequencer::{GroupWindow, Timeline};
use crate::utils::{RenderError, WordTransform};
use crate::variants::{renderer_for_style, SubtitleRenderer};
use caption_core::{Group, SubtitleStyleConfig, Transcript};
use std::sync::Arc;

/// Times a layout is retried after its fonts were reported loaded
const FONT_RETRIES: usize = 3;

/// Evaluates frames of one transcript rendered with one style
pub struct Compositor {
    context: RenderContext,
    transcript: Arc<Transcript>,
    style: Arc<SubtitleStyleConfig>,
    renderer: Arc<dyn SubtitleRenderer>,
    timeline: Timeline,
    params: LayoutParams,
}

impl Compositor {
    /// Create a compositor; the variant is selected from the style id
    pub fn new(
        context: RenderContext,
        transcript: Arc<Transcript>,
        style: Arc<SubtitleStyleConfig>,
    ) -> Result<Self, RenderError> {
        let renderer = renderer_for_style(&style.id);
        Self::with_renderer(context, transcript, style, renderer)
    }

    /// Create a compositor painting with a specific renderer
    pub fn with_renderer(
        context: RenderContext,
        transcript: Arc<Transcript>,
        style: Arc<SubtitleStyleConfig>,
        renderer: Arc<dyn SubtitleRenderer>,
    ) -> Result<Self, RenderError> {
        let composition = context.composition();
        composition.validate()?;

        let variant = renderer.params();
        let params = LayoutParams {
            container_width: composition.container_width(),
            max_font_size: variant.max_font_size,
            line_spacing: variant.line_spacing,
            align: variant.align,
        };
        let timeline = Timeline::build(transcript.groups(), composition.fps);

        Ok(Self {
            context,
            transcript,
            style,
            renderer,
            timeline,
            params,
        })
    }

    /// Render context
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Transcript being rendered
    pub fn transcript(&self) -> &Arc<Transcript> {
        &self.transcript
    }

    /// Resolved style
    pub fn style(&self) -> &Arc<SubtitleStyleConfig> {
        &self.style
    }

    /// Paint step
    pub fn renderer(&self) -> &Arc<dyn SubtitleRenderer> {
        &self.renderer
    }

    /// Group and line windows
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Layout parameters derived from the composition and variant
    pub fn layout_params(&self) -> &LayoutParams {
        &self.params
    }

    /// Left edge of the caption container in frame pixels
    pub fn container_left(&self) -> f32 {
        (self.context.composition().width as f32 - self.params.container_width) / 2.0
    }

    /// Layout of the group at `group_index`, from the cache when available.
    ///
    /// A missing font family parks the caller on the font gate and retries;
    /// any other layout failure is logged and the group renders as absent.
    pub fn group_layout(&self, group_index: usize) -> Result<Arc<GroupLayout>, RenderError> {
        let group = self.transcript.groups().get(group_index).ok_or_else(|| {
            RenderError::InvalidInput(format!("group {group_index} out of range"))
        })?;

        let policies = self.context.policies();
        let key = LayoutKey::new(group, &self.style, &self.params, policies.generation());
        self.context
            .layout_cache()
            .get_or_insert_with(key, || self.compute_layout(group))
    }

    fn compute_layout(&self, group: &Group) -> Result<GroupLayout, RenderError> {
        if group.lines.is_empty() {
            log::warn!("group '{}' has no lines, skipping", group.id);
            return Ok(GroupLayout::empty());
        }

        let policy = self.context.policies().get(&self.style.id);
        let mut retries = 0;
        loop {
            match layout_group(
                group,
                &self.style,
                self.context.measurer(),
                &self.params,
                policy.as_deref(),
            ) {
                Ok(layout) => return Ok(layout),
                Err(RenderError::FontNotLoaded(family)) => {
                    if retries == FONT_RETRIES {
                        return Err(RenderError::FontsUnavailable {
                            families: vec![family],
                            waited_ms: u64::try_from(self.context.font_wait().as_millis())
                                .unwrap_or(u64::MAX),
                        });
                    }
                    retries += 1;
                    self.context
                        .fonts()
                        .wait_for_families(&[family.as_str()], self.context.font_wait())?;
                }
                Err(err) if err.is_resource_error() => return Err(err),
                Err(err) => {
                    log::warn!("layout of group '{}' failed, skipping: {err}", group.id);
                    return Ok(GroupLayout::empty());
                }
            }
        }
    }

    /// Lay out every group up front
    pub fn prepare(&self) -> Result<(), RenderError> {
        for index in 0..self.transcript.len() {
            self.group_layout(index)?;
        }
        Ok(())
    }

    /// Every word visible at `frame`, in paint order
    pub fn render_frame(&self, frame: i64) -> Result<FrameState, RenderError> {
        let composition = self.context.composition();
        let mut state = FrameState::empty(frame, composition.width, composition.height);

        for window in self.timeline.active_at(frame) {
            let layout = self.group_layout(window.group_index)?;
            if layout.is_empty() {
                continue;
            }
            let group = &self.transcript.groups()[window.group_index];
            self.compose_group(group, window, &layout, frame, &mut state.words);
        }

        Ok(state)
    }

    fn compose_group(
        &self,
        group: &Group,
        window: &GroupWindow,
        layout: &GroupLayout,
        frame: i64,
        out: &mut Vec<WordPrimitive>,
    ) {
        let fps = self.timeline.fps();
        let group_frame = frame - window.from;
        let left = self.container_left();
        let top = self.style.caption_padding as f32;

        for line_window in &window.lines {
            let Some(line_frame) = line_window.local_frame(group_frame) else {
                continue;
            };
            let index = line_window.line_index;
            let (Some(line), Some(line_layout), Some(&animation)) = (
                group.lines.get(index),
                layout.lines.get(index),
                layout.animations.get(index),
            ) else {
                continue;
            };

            let font = self.style.fonts.get(line.font_type);
            let font_spec = FontSpec::new(font, line_layout.font_size);
            let color = self.renderer.fill_color(font);
            let text_shadow = self.renderer.text_shadow(font);
            let height = line_layout.font_size * LINE_HEIGHT;

            for (word_index, (word, placement)) in line.words.iter().zip(&line_layout.words).enumerate() {
                let timing = WordTiming::new(word.start_time, line.start_time, fps, line_window.duration);
                let visual = word_visual(animation, &timing, line_frame, fps);

                out.push(WordPrimitive {
                    group_index: window.group_index,
                    line_index: index,
                    word_index,
                    text: font.transform_text(&word.text).into_owned(),
                    x: left + placement.x_center,
                    y: top + line_layout.offset_y + placement.y,
                    width: placement.width,
                    height,
                    font: font_spec.clone(),
                    color,
                    opacity: visual.opacity as f32,
                    blur: visual.blur as f32,
                    transform: WordTransform {
                        translate_x: visual.translate_x as f32,
                        translate_y: visual.translate_y as f32,
                        scale: visual.scale as f32,
                    },
                    text_shadow: text_shadow.clone(),
                });
            }
        }
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("style", &self.style.id)
            .field("variant", &self.renderer.kind())
            .field("groups", &self.transcript.len())
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::FixedAdvanceMeasurer;
    use caption_core::{resolve_style, Composition, FontType, Line, Word};
    use pretty_assertions::assert_eq;

    fn word(text: &str, start: f64) -> Word {
        Word {
            id: text.into(),
            text: text.into(),
            start_time: start,
            end_time: start + 0.3,
        }
    }

    fn compositor(groups: Vec<Group>, style_id: &str) -> Compositor {
        let context = RenderContext::with_measurer(
            Composition::new(1000, 1000, 30.0, 600),
            Arc::new(FixedAdvanceMeasurer),
        );
        Compositor::new(
            context,
            Arc::new(Transcript::new(groups)),
            Arc::new(resolve_style(style_id, None)),
        )
        .unwrap()
    }

    fn single_group() -> Group {
        Group {
            id: "g".into(),
            start_time: 2.0,
            end_time: 4.0,
            lines: vec![Line {
                id: "l".into(),
                start_time: 2.0,
                end_time: 4.0,
                font_type: FontType::Normal,
                words: vec![word("one", 2.0), word("two", 2.5)],
            }],
        }
    }

    #[test]
    fn nothing_outside_group_window() {
        let compositor = compositor(vec![single_group()], "basic");
        assert!(compositor.render_frame(59).unwrap().words.is_empty());
        assert!(compositor.render_frame(120).unwrap().words.is_empty());
        assert_eq!(compositor.render_frame(60).unwrap().words.len(), 2);
    }

    #[test]
    fn words_are_positioned_inside_container() {
        let compositor = compositor(vec![single_group()], "basic");
        let state = compositor.render_frame(90).unwrap();
        let left = compositor.container_left();
        assert_eq!(left, 50.0);
        for word in &state.words {
            assert!(word.x - word.width / 2.0 >= left);
            assert!(word.x + word.width / 2.0 <= left + 900.0);
        }
        assert!(state.words[0].x < state.words[1].x);
        assert_eq!(state.words[0].y, state.words[1].y);
    }

    #[test]
    fn later_word_waits_for_its_entrance() {
        let compositor = compositor(vec![single_group()], "basic");
        let state = compositor.render_frame(60).unwrap();
        // "one" is 4 frames into its spring, "two" starts 11 frames later.
        assert!(state.words[0].opacity > 0.0);
        assert_eq!(state.words[1].opacity, 0.0);
    }

    #[test]
    fn empty_group_renders_nothing_and_is_cached() {
        let empty = Group {
            id: "empty".into(),
            start_time: 0.0,
            end_time: 1.0,
            lines: Vec::new(),
        };
        let compositor = compositor(vec![empty], "basic");
        assert!(compositor.render_frame(10).unwrap().words.is_empty());
        assert!(compositor.render_frame(11).unwrap().words.is_empty());
        let stats = compositor.context().layout_cache().stats();
        assert_eq!((stats.entries, stats.hits), (1, 1));
    }

    #[test]
    fn primitives_carry_paint_attributes() {
        let compositor = compositor(vec![single_group()], "basic");
        let state = compositor.render_frame(100).unwrap();
        let font = compositor.style().fonts.get(FontType::Normal);
        let word = &state.words[0];
        assert_eq!(word.text, font.transform_text("one"));
        assert_eq!(word.font.family, font.font_family);
        assert_eq!(word.text_shadow, compositor.renderer().text_shadow(font));
        assert_eq!(word.color, font.fill_color());
    }

    #[test]
    fn rejects_invalid_composition() {
        let context = RenderContext::with_measurer(
            Composition::new(0, 1000, 30.0, 1),
            Arc::new(FixedAdvanceMeasurer),
        );
        let result = Compositor::new(
            context,
            Arc::new(Transcript::default()),
            Arc::new(resolve_style("basic", None)),
        );
        assert!(matches!(result, Err(RenderError::CoreError(_))));
    }
}
