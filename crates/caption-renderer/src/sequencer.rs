//! Placement of groups and lines on the frame timeline
//!
//! A group stays on screen until the next group starts, so short pauses
//! between screens never flash an empty frame. Lines inside a group start a
//! few frames early so their first word can begin its entrance before it is
//! spoken, and all run until the group's window closes.

use crate::animation::ANTICIPATION_FRAMES;
use caption_core::{frame_at, Group};

/// Frame range of one line, relative to its group window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    /// Index of the line within its group
    pub line_index: usize,
    /// First frame, relative to the group window start
    pub from: i64,
    /// Number of frames, at least 1
    pub duration: i64,
}

impl LineWindow {
    /// Line-relative frame for a group-relative frame, `None` outside the window
    pub fn local_frame(&self, group_frame: i64) -> Option<i64> {
        let local = group_frame - self.from;
        (0..self.duration).contains(&local).then_some(local)
    }
}

/// Frame range of one group on the composition timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupWindow {
    /// Index of the group within the transcript
    pub group_index: usize,
    /// First frame, inclusive
    pub from: i64,
    /// Number of frames, at least 1
    pub duration: i64,
    /// Windows of the group's lines
    pub lines: Vec<LineWindow>,
}

impl GroupWindow {
    /// One past the last frame
    pub fn end(&self) -> i64 {
        self.from + self.duration
    }

    /// Whether `frame` falls inside `[from, end)`
    pub fn contains(&self, frame: i64) -> bool {
        (self.from..self.end()).contains(&frame)
    }
}

/// Frame windows for every group of a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    fps: f64,
    windows: Vec<GroupWindow>,
}

impl Timeline {
    /// Place `groups` on a timeline running at `fps`
    pub fn build(groups: &[Group], fps: f64) -> Self {
        let windows = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let from = frame_at(group.start_time, fps);
                let to = match groups.get(index + 1) {
                    Some(next) => frame_at(next.start_time, fps),
                    None => frame_at(group.end_time, fps),
                };
                let duration = (to - from).max(1);

                let lines = group
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(line_index, line)| {
                        let line_from =
                            (frame_at(line.start_time - group.start_time, fps) - ANTICIPATION_FRAMES).max(0);
                        LineWindow {
                            line_index,
                            from: line_from,
                            duration: (duration - line_from).max(1),
                        }
                    })
                    .collect();

                GroupWindow {
                    group_index: index,
                    from,
                    duration,
                    lines,
                }
            })
            .collect();

        Self { fps, windows }
    }

    /// Frame rate the timeline was built for
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// All group windows in transcript order
    pub fn windows(&self) -> &[GroupWindow] {
        &self.windows
    }

    /// Groups whose window contains `frame`
    pub fn active_at(&self, frame: i64) -> impl Iterator<Item = &GroupWindow> + '_ {
        self.windows.iter().filter(move |window| window.contains(frame))
    }

    /// One past the last frame any group occupies
    pub fn end_frame(&self) -> i64 {
        self.windows.iter().map(GroupWindow::end).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caption_core::Line;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn group(id: &str, start: f64, end: f64, line_starts: &[f64]) -> Group {
        Group {
            id: id.to_string(),
            start_time: start,
            end_time: end,
            lines: line_starts
                .iter()
                .enumerate()
                .map(|(i, &line_start)| Line {
                    id: format!("{id}-{i}"),
                    start_time: line_start,
                    end_time: end,
                    font_type: Default::default(),
                    words: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn group_holds_until_next_group_starts() {
        let groups = [group("a", 10.0, 12.0, &[10.0]), group("b", 15.0, 16.0, &[15.0])];
        let timeline = Timeline::build(&groups, 30.0);
        let first = &timeline.windows()[0];
        assert_eq!((first.from, first.end()), (300, 450));
        assert!(timeline.active_at(449).any(|w| w.group_index == 0));
        assert!(!timeline.active_at(450).any(|w| w.group_index == 0));
    }

    #[test]
    fn last_group_ends_at_its_own_end() {
        let groups = [group("a", 1.0, 2.0, &[1.0])];
        let timeline = Timeline::build(&groups, 30.0);
        assert_eq!(timeline.windows()[0].end(), 60);
        assert_eq!(timeline.end_frame(), 60);
    }

    #[test]
    fn collapsed_group_lasts_one_frame() {
        let groups = [group("a", 5.0, 5.0, &[]), group("b", 5.0, 6.0, &[])];
        let timeline = Timeline::build(&groups, 30.0);
        assert_eq!(timeline.windows()[0].duration, 1);
    }

    #[test]
    fn lines_start_with_anticipation() {
        let groups = [group("a", 2.0, 6.0, &[2.0, 3.0, 2.05])];
        let timeline = Timeline::build(&groups, 30.0);
        let lines = &timeline.windows()[0].lines;
        assert_eq!(lines[0], LineWindow { line_index: 0, from: 0, duration: 120 });
        assert_eq!(lines[1], LineWindow { line_index: 1, from: 26, duration: 94 });
        // Anticipation never reaches before the group start.
        assert_eq!(lines[2].from, 0);
        assert_eq!(lines[1].local_frame(26), Some(0));
        assert_eq!(lines[1].local_frame(25), None);
        assert_eq!(lines[1].local_frame(120), None);
    }

    proptest! {
        #[test]
        fn windows_never_empty(
            starts in proptest::collection::vec(0.0f64..100.0, 1..8),
            fps in prop_oneof![Just(24.0), Just(25.0), Just(29.97), Just(30.0), Just(60.0)],
        ) {
            let mut starts = starts;
            starts.sort_by(f64::total_cmp);
            let groups: Vec<Group> = starts
                .iter()
                .enumerate()
                .map(|(i, &s)| group(&i.to_string(), s, s + 1.0, &[s, s + 0.5]))
                .collect();
            let timeline = Timeline::build(&groups, fps);
            for window in timeline.windows() {
                prop_assert!(window.duration >= 1);
                for line in &window.lines {
                    prop_assert!(line.from >= 0);
                    prop_assert!(line.duration >= 1);
                }
            }
        }
    }
}
