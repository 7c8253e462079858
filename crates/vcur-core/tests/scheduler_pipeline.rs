//! End-to-end scenarios for the flash pipeline.

use web_time::{Duration, Instant};

use vcur_core::{
    FlashCommand, FlashPhase, FlashScheduler, FlashState, ScrollSample, Trigger,
    can_schedule_flash,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A view change mid-click is admitted; a scroll during the resulting flash
/// is not; after the flash ends the scroll path works again.
#[test]
fn view_change_beats_fence_then_flash_blocks_scroll() {
    let now = Instant::now();

    // Pure-contract form first.
    let mid_click = FlashState {
        is_fence_active: true,
        is_flash_active: false,
        has_pending_flash: false,
        last_admitted_at: None,
        now,
    };
    assert!(can_schedule_flash(Trigger::ViewChange, &mid_click));

    let mid_flash = FlashState {
        is_fence_active: false,
        is_flash_active: true,
        has_pending_flash: false,
        last_admitted_at: Some(now),
        now,
    };
    assert!(!can_schedule_flash(Trigger::Scroll, &mid_flash));

    // Same story through the stateful pipeline.
    let mut sched = FlashScheduler::default();
    let t0 = Instant::now();

    sched.on_pointer_down();
    assert!(sched.request(Trigger::ViewChange, t0));
    assert_eq!(sched.poll(t0 + ms(50)), vec![FlashCommand::Render]);

    // Scroll while the flash is up: suppressed, never admitted.
    sched.on_scroll(ScrollSample::new(30.0), t0 + ms(100));
    assert_eq!(sched.phase(), FlashPhase::Active);

    // Flash ends; once the suppression window drains, scroll admits again.
    assert_eq!(sched.poll(t0 + ms(650)), vec![FlashCommand::Clear]);
    sched.on_pointer_up(t0 + ms(650));
    sched.on_scroll(ScrollSample::new(30.0), t0 + ms(1200));
    assert_eq!(sched.poll(t0 + ms(1350)), vec![]);
    assert_eq!(sched.phase(), FlashPhase::Pending);
}

/// Two scroll events 10ms apart: the small delta arms the slow debounce,
/// the large delta re-arms the fast one, and exactly one flash results.
#[test]
fn rapid_scrolls_collapse_to_one_flash() {
    let mut sched = FlashScheduler::default();
    let t0 = Instant::now();

    sched.on_scroll(ScrollSample::new(2.0), t0);
    sched.on_scroll(ScrollSample::new(80.0), t0 + ms(10));

    // The first (250ms) deadline was cancelled: nothing fires at t0+250
    // except the second (t0+10+150=160) deadline, which already admitted.
    let mut renders = 0;
    let mut t = t0;
    for _ in 0..100 {
        t += ms(10);
        for cmd in sched.poll(t) {
            if cmd == FlashCommand::Render {
                renders += 1;
            }
        }
    }
    assert_eq!(renders, 1);
}

/// The 100ms minimum interval spaces out non-bypass admissions.
#[test]
fn min_interval_spaces_scroll_admissions() {
    let now = Instant::now() + Duration::from_secs(1);

    let mut state = FlashState {
        is_fence_active: false,
        is_flash_active: false,
        has_pending_flash: false,
        last_admitted_at: Some(now - ms(50)),
        now,
    };
    assert!(!can_schedule_flash(Trigger::Scroll, &state));

    state.last_admitted_at = Some(now - ms(150));
    assert!(can_schedule_flash(Trigger::Scroll, &state));
}

/// A full keyboard-navigation lifecycle: admit, render, clear, re-admit.
#[test]
fn key_navigation_full_lifecycle() {
    let mut sched = FlashScheduler::default();
    let t0 = Instant::now();

    assert!(sched.request(Trigger::KeyNavigation, t0));
    assert_eq!(sched.poll(t0 + ms(50)), vec![FlashCommand::Render]);
    assert_eq!(sched.poll(t0 + ms(650)), vec![FlashCommand::Clear]);

    // 651ms > min interval since admission at t0; admits again.
    assert!(sched.request(Trigger::KeyNavigation, t0 + ms(651)));
}

/// Teardown during the pending window: the render never happens.
#[test]
fn cancel_between_admission_and_render_drops_the_flash() {
    let mut sched = FlashScheduler::default();
    let t0 = Instant::now();

    assert!(sched.request(Trigger::ViewChange, t0));
    sched.cancel_all();

    assert!(sched.poll(t0 + ms(50)).is_empty());
    assert!(sched.poll(t0 + ms(10_000)).is_empty());
    assert_eq!(sched.phase(), FlashPhase::Idle);
}
