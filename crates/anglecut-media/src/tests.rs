//! End-to-end director scenarios.
//!
//! These run the full loop through `run_director` with in-memory sources,
//! tagging each frame with `(tick, angle)` so the output order can be
//! checked exactly.

#[cfg(test)]
mod switching_scenarios {
    use crate::mask::MotionMask;
    use crate::runner::run_director_with;
    use crate::source::{CollectingSink, MemorySource, NeverCancel};
    use crate::Director;
    use anglecut_models::{AngleId, DirectorConfig};

    type Tagged = (u32, usize);

    fn sources_from(levels: &[Vec<u8>]) -> Vec<MemorySource<Tagged>> {
        levels
            .iter()
            .enumerate()
            .map(|(angle, per_tick)| {
                MemorySource::new(per_tick.iter().enumerate().map(|(tick, &level)| {
                    ((tick as u32, angle), MotionMask::filled(8, 6, level).unwrap())
                }))
            })
            .collect()
    }

    #[test]
    fn test_equal_scores_pick_lowest_angle() {
        let director = Director::new(DirectorConfig::for_angles(3)).unwrap();
        let mut sources = sources_from(&[vec![7; 4], vec![7; 4], vec![7; 4]]);
        let mut sink = CollectingSink::new();

        let mut selected = Vec::new();
        run_director_with(director, &mut sources, &mut sink, &NeverCancel, |d| {
            selected.push(d.selected_angle);
            Ok(())
        })
        .unwrap();
        assert_eq!(selected, vec![AngleId(0); 4]);
    }

    #[test]
    fn test_alternating_activity_switches_after_min_wait() {
        let config = DirectorConfig::default();
        let phase = config.min_wait as usize + 1;
        let director = Director::new(config).unwrap();

        let mut angle0 = vec![5u8; phase];
        angle0.extend(vec![9u8; phase]);
        let mut angle1 = vec![9u8; phase];
        angle1.extend(vec![5u8; phase]);
        let mut sources = sources_from(&[angle0, angle1]);
        let mut sink = CollectingSink::new();

        let mut switch_ticks = Vec::new();
        let summary = run_director_with(director, &mut sources, &mut sink, &NeverCancel, |d| {
            if d.switched {
                switch_ticks.push(d.tick);
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(switch_ticks, vec![0, phase as u64]);
        assert_eq!(summary.switches, 2);

        let frames = sink.into_frames();
        assert!(frames[..phase].iter().all(|&(_, angle)| angle == 1));
        assert!(frames[phase..].iter().all(|&(_, angle)| angle == 0));
    }

    #[test]
    fn test_flicker_held_back_during_dwell() {
        let config = DirectorConfig::for_angles(2).with_min_wait(10);
        let director = Director::new(config).unwrap();

        // Angle 0 leads at tick 0, angle 1 leads on every odd tick
        let angle0: Vec<u8> = (0..20).map(|t| if t % 2 == 0 { 9 } else { 5 }).collect();
        let angle1: Vec<u8> = (0..20).map(|t| if t % 2 == 0 { 5 } else { 9 }).collect();
        let mut sources = sources_from(&[angle0, angle1]);
        let mut sink = CollectingSink::new();

        let mut held = 0;
        let mut switch_ticks = Vec::new();
        run_director_with(director, &mut sources, &mut sink, &NeverCancel, |d| {
            held += usize::from(d.held_back());
            if d.switched {
                switch_ticks.push(d.tick);
            }
            Ok(())
        })
        .unwrap();

        // Locked for ticks 1..=10, the first odd tick after that switches,
        // then locked again for the rest of the run
        assert_eq!(switch_ticks, vec![0, 11]);
        assert_eq!(held, 9);
    }

    #[test]
    fn test_switches_respect_minimum_spacing() {
        let min_wait = 7u32;
        let config = DirectorConfig::for_angles(3).with_min_wait(min_wait);
        let director = Director::new(config).unwrap();

        // Deterministic pseudo-random activity levels
        let mut state = 0x2545_f491u32;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 60) as u8
        };
        let levels: Vec<Vec<u8>> = (0..3).map(|_| (0..400).map(|_| next()).collect()).collect();
        let mut sources = sources_from(&levels);
        let mut sink = CollectingSink::new();

        let mut switch_ticks = Vec::new();
        run_director_with(director, &mut sources, &mut sink, &NeverCancel, |d| {
            if d.switched {
                switch_ticks.push(d.tick);
            }
            Ok(())
        })
        .unwrap();

        assert!(switch_ticks.len() > 2);
        for pair in switch_ticks.windows(2) {
            assert!(
                pair[1] - pair[0] > u64::from(min_wait),
                "switches at {} and {} are too close",
                pair[0],
                pair[1]
            );
        }
    }
}

#[cfg(test)]
mod pause_scenarios {
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::mask::MotionMask;
    use crate::runner::{run_director, run_director_with, StopReason};
    use crate::source::{CollectingSink, MemorySource, NeverCancel};
    use crate::Director;
    use anglecut_models::DirectorConfig;

    const ACTIVE: u8 = 120;
    const IDLE: u8 = 0;

    fn single_angle(levels: &[u8]) -> Vec<MemorySource<u32>> {
        vec![MemorySource::new(
            levels
                .iter()
                .enumerate()
                .map(|(tick, &level)| (tick as u32, MotionMask::filled(8, 6, level).unwrap())),
        )]
    }

    fn eliding(capacity: usize) -> DirectorConfig {
        DirectorConfig::for_angles(1)
            .with_pause_elision(true)
            .with_pause_end_frames(capacity)
    }

    #[test]
    fn test_long_pause_keeps_only_its_tail() {
        let director = Director::new(eliding(3)).unwrap();
        let mut sources = single_angle(&[IDLE, IDLE, IDLE, IDLE, IDLE, ACTIVE]);
        let mut sink = CollectingSink::new();

        let summary = run_director(director, &mut sources, &mut sink, &NeverCancel).unwrap();

        assert_eq!(sink.frames(), &[2, 3, 4, 5]);
        assert_eq!(summary.pause_ticks, 5);
        assert_eq!(summary.evicted_frames, 2);
        assert_eq!(summary.discarded_pause_frames, 0);
    }

    #[test]
    fn test_zero_capacity_drops_every_pause_frame() {
        let director = Director::new(eliding(0)).unwrap();
        let mut sources = single_angle(&[ACTIVE, IDLE, IDLE, ACTIVE]);
        let mut sink = CollectingSink::new();

        let summary = run_director(director, &mut sources, &mut sink, &NeverCancel).unwrap();
        assert_eq!(sink.frames(), &[0, 3]);
        assert_eq!(summary.evicted_frames, 2);
    }

    #[test]
    fn test_cancel_mid_pause_never_writes_buffered_frames() {
        let director = Director::new(eliding(10)).unwrap();
        let mut sources = single_angle(&[ACTIVE, ACTIVE, IDLE, IDLE, ACTIVE, ACTIVE]);
        let mut sink = CollectingSink::new();
        let cancel = AtomicBool::new(false);

        let summary = run_director_with(director, &mut sources, &mut sink, &cancel, |d| {
            if d.tick == 3 {
                cancel.store(true, Ordering::Relaxed);
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.discarded_pause_frames, 2);
        assert_eq!(sink.frames(), &[0, 1]);
    }

    #[test]
    fn test_source_end_mid_pause_discards_buffer() {
        let director = Director::new(eliding(10)).unwrap();
        let mut sources = single_angle(&[ACTIVE, IDLE, IDLE, IDLE]);
        let mut sink = CollectingSink::new();

        let summary = run_director(director, &mut sources, &mut sink, &NeverCancel).unwrap();
        assert_eq!(sink.frames(), &[0]);
        assert_eq!(summary.discarded_pause_frames, 3);
    }

    #[test]
    fn test_output_is_ordered_without_duplicates() {
        let pattern: Vec<u8> = (0..200)
            .map(|t| match t % 37 {
                0..=5 => IDLE,
                20..=31 => IDLE,
                _ => ACTIVE,
            })
            .collect();
        let director = Director::new(eliding(4)).unwrap();
        let mut sources = single_angle(&pattern);
        let mut sink = CollectingSink::new();

        let summary = run_director(director, &mut sources, &mut sink, &NeverCancel).unwrap();
        let frames = sink.into_frames();

        assert!(frames.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            summary.frames_written + summary.evicted_frames + summary.discarded_pause_frames as u64,
            summary.ticks
        );
    }

    #[test]
    fn test_without_elision_every_tick_is_written() {
        let config = DirectorConfig::for_angles(1).with_pause_end_frames(2);
        let director = Director::new(config).unwrap();
        let mut sources = single_angle(&[IDLE; 6]);
        let mut sink = CollectingSink::new();

        let summary = run_director(director, &mut sources, &mut sink, &NeverCancel).unwrap();
        assert_eq!(sink.frames(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(summary.pause_ticks, 0);
    }
}
