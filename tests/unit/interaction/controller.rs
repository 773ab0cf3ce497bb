//! Tests for the click/revert state machine

#[cfg(test)]
mod tests {
    use cshape::ShapeError;
    use cshape::interaction::controller::{
        ClickOutcome, Controller, Phase, RevertEvent, RevertTiming,
    };
    use cshape::io::input::Count;
    use cshape::io::visualization::SessionEventKind;
    use cshape::layout::CellId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    /// Counts warning and error events
    struct WarningCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarningCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let level = *event.metadata().level();
            if level == Level::WARN || level == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn submitted(text: &str) -> Controller {
        let mut controller = Controller::default();
        if let Err(e) = controller.submit(text) {
            panic!("submit {text:?} failed: {e}");
        }
        controller
    }

    fn cells(controller: &Controller) -> Vec<CellId> {
        controller
            .shape()
            .map(|shape| shape.cell_ids().collect())
            .unwrap_or_default()
    }

    fn mark_all(controller: &mut Controller, order: &[CellId]) {
        for &id in order {
            controller.click(id);
        }
    }

    // Tests a fresh controller has no shape and ignores clicks
    #[test]
    fn test_initial_state() {
        let mut controller = Controller::default();
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.shape().is_none());
        assert_eq!(controller.click(CellId::new(0, 0)), ClickOutcome::UnknownCell);
        assert_eq!(controller.timing(), RevertTiming::default());
    }

    // Tests a valid submission creates a shape and activates the controller
    #[test]
    fn test_submit_valid() {
        let controller = submitted("5");
        assert_eq!(controller.phase(), Phase::Active);
        assert_eq!(controller.shape().map(|s| s.row_lengths()), Some(vec![2, 1, 2]));
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.marked_count(), 0);
    }

    // Tests invalid submissions leave shape and marks untouched
    // Verified by resetting the board before validation
    #[test]
    fn test_invalid_submit_keeps_state() {
        let mut controller = submitted("7");
        controller.click(CellId::new(0, 0));

        for text in ["", "   ", "seven", "7.5", "4", "26"] {
            let result = controller.submit(text).map(|_| ());
            assert!(result.is_err(), "{text:?} should be rejected");
        }

        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.shape().map(|s| s.cell_count()), Some(7));
        assert!(controller.is_marked(CellId::new(0, 0)));
        assert_eq!(controller.click_order(), &[CellId::new(0, 0)]);
    }

    // Tests the error kinds reported for rejected text
    #[test]
    fn test_submit_error_kinds() {
        let mut controller = Controller::default();
        assert!(matches!(controller.submit(""), Err(ShapeError::EmptyInput)));
        assert!(matches!(
            controller.submit("x"),
            Err(ShapeError::NotAnInteger { .. })
        ));
        assert!(matches!(
            controller.submit("4"),
            Err(ShapeError::OutOfRange { value: 4, .. })
        ));
        assert!(matches!(
            controller.submit("26"),
            Err(ShapeError::OutOfRange { value: 26, .. })
        ));
        assert!(controller.shape().is_none());
        assert_eq!(controller.phase(), Phase::Idle);
    }

    // Tests submitting a validated count directly
    #[test]
    fn test_submit_count() {
        let mut controller = Controller::default();
        let count = Count::new(25).unwrap_or_else(|e| panic!("{e}"));
        let rows = controller.submit_count(count).map(|s| s.row_count()).ok();
        assert_eq!(rows, Some(9));
    }

    // Tests clicks mark cells and append to the order log
    #[test]
    fn test_click_marks_in_order() {
        let mut controller = submitted("5");
        let first = CellId::new(2, 1);
        let second = CellId::new(0, 0);

        assert_eq!(controller.click(first), ClickOutcome::Marked);
        assert_eq!(controller.click(second), ClickOutcome::Marked);
        assert_eq!(controller.click_order(), &[first, second]);
        assert_eq!(controller.marked_cells(), vec![second, first]);
        assert_eq!(controller.phase(), Phase::Active);
    }

    // Tests clicking a marked cell changes nothing
    // Verified by toggling marks off on repeat clicks
    #[test]
    fn test_click_idempotent() {
        let mut controller = submitted("6");
        let id = CellId::new(1, 0);
        controller.click(id);
        let before = (controller.marked_cells(), controller.click_order().to_vec());

        assert_eq!(controller.click(id), ClickOutcome::AlreadyMarked);
        let after = (controller.marked_cells(), controller.click_order().to_vec());
        assert_eq!(before, after);
    }

    // Tests clicks outside the shape are benign
    #[test]
    fn test_click_unknown_cell() {
        let mut controller = submitted("5");
        assert_eq!(controller.click(CellId::new(1, 1)), ClickOutcome::UnknownCell);
        assert_eq!(controller.marked_count(), 0);
    }

    // Tests marking the last cell completes and locks clicks
    #[test]
    fn test_completion_locks_clicks() {
        let mut controller = submitted("5");
        let ids = cells(&controller);
        let (last, rest) = ids.split_last().unwrap_or_else(|| panic!("empty shape"));
        mark_all(&mut controller, rest);

        assert_eq!(controller.click(*last), ClickOutcome::Completed);
        assert_eq!(controller.phase(), Phase::Complete);
        assert_eq!(controller.pending_tasks(), 1);
        assert_eq!(controller.click(CellId::new(0, 0)), ClickOutcome::Locked);
        assert_eq!(controller.time_to_next_task(), Some(ms(1000)));
    }

    // Tests the full revert timeline with default timing
    // Verified by unmarking in click order instead of reverse
    #[test]
    fn test_revert_timeline() {
        let mut controller = submitted("5");
        let order = [
            CellId::new(1, 0),
            CellId::new(0, 1),
            CellId::new(2, 0),
            CellId::new(0, 0),
            CellId::new(2, 1),
        ];
        mark_all(&mut controller, &order);
        assert_eq!(controller.phase(), Phase::Complete);

        assert!(controller.tick(ms(999)).is_empty());
        assert_eq!(controller.phase(), Phase::Complete);

        assert_eq!(
            controller.tick(ms(1)),
            vec![RevertEvent::Started, RevertEvent::Unmarked(CellId::new(2, 1))]
        );
        assert_eq!(controller.phase(), Phase::Reverting);
        assert_eq!(controller.click(CellId::new(2, 1)), ClickOutcome::Locked);

        for expected in order.iter().rev().skip(1) {
            assert!(controller.tick(ms(999)).is_empty());
            assert_eq!(
                controller.tick(ms(1)),
                vec![RevertEvent::Unmarked(*expected)]
            );
        }
        assert_eq!(controller.marked_count(), 0);
        assert_eq!(controller.phase(), Phase::Reverting);

        assert!(controller.tick(ms(999)).is_empty());
        assert_eq!(controller.tick(ms(1)), vec![RevertEvent::Finished]);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.click_order().is_empty());
        assert_eq!(controller.pending_tasks(), 0);
        assert_eq!(controller.now(), RevertTiming::default().total(5));
    }

    // Tests a single large tick runs the whole sequence in order
    #[test]
    fn test_revert_in_one_tick() {
        let mut controller = Controller::new(RevertTiming::uniform(ms(10)));
        controller
            .submit("8")
            .unwrap_or_else(|e| panic!("{e}"));
        let mut order = cells(&controller);
        order.reverse();
        mark_all(&mut controller, &order);

        let events = controller.tick(ms(10_000));
        let unmarked: Vec<CellId> = events
            .iter()
            .filter_map(|event| match event {
                RevertEvent::Unmarked(id) => Some(*id),
                _ => None,
            })
            .collect();

        let mut expected = order.clone();
        expected.reverse();
        assert_eq!(unmarked, expected);
        assert_eq!(events.first(), Some(&RevertEvent::Started));
        assert_eq!(events.last(), Some(&RevertEvent::Finished));
        assert_eq!(controller.phase(), Phase::Idle);
    }

    // Tests clicks are accepted again after the revert finishes
    #[test]
    fn test_clicks_after_revert() {
        let mut controller = Controller::new(RevertTiming::uniform(ms(1)));
        controller.submit("5").unwrap_or_else(|e| panic!("{e}"));
        let ids = cells(&controller);
        mark_all(&mut controller, &ids);
        controller.tick(ms(100));
        assert_eq!(controller.phase(), Phase::Idle);

        assert_eq!(controller.click(CellId::new(0, 0)), ClickOutcome::Marked);
        assert_eq!(controller.phase(), Phase::Active);
        assert_eq!(controller.click_order(), &[CellId::new(0, 0)]);
    }

    // Tests a new submission cancels an in-flight revert
    // Verified by keeping pending tasks across submissions
    #[test]
    fn test_submit_cancels_revert() {
        let mut controller = submitted("5");
        let ids = cells(&controller);
        mark_all(&mut controller, &ids);
        controller.tick(ms(2000));
        assert_eq!(controller.phase(), Phase::Reverting);
        assert!(controller.pending_tasks() > 0);

        controller.submit("6").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(controller.pending_tasks(), 0);
        assert_eq!(controller.phase(), Phase::Active);
        assert_eq!(controller.generation(), 2);

        controller.click(CellId::new(0, 0));
        assert!(controller.tick(ms(60_000)).is_empty());
        assert!(controller.is_marked(CellId::new(0, 0)));
        assert_eq!(controller.click_order(), &[CellId::new(0, 0)]);
    }

    // Tests the grid snapshot mirrors the marks
    #[test]
    fn test_grid_snapshot() {
        let mut controller = submitted("5");
        assert!(controller.grid().is_some_and(|g| g.marked_count() == 0));
        controller.click(CellId::new(1, 0));
        assert!(controller.grid().is_some_and(|g| g.marked_count() == 1));
    }

    // Tests recording captures generation, marks and unmarks with timestamps
    #[test]
    fn test_recording() {
        let mut controller = Controller::new(RevertTiming::uniform(ms(100)));
        controller.enable_recording();
        controller.submit("5").unwrap_or_else(|e| panic!("{e}"));
        let ids = cells(&controller);
        mark_all(&mut controller, &ids);
        controller.tick(ms(10_000));

        let Some(capture) = controller.recording.as_ref() else {
            panic!("recording should be enabled");
        };
        // 1 generation + 5 marks + 5 unmarks
        assert_eq!(capture.event_count(), 11);

        let events = capture.events();
        assert!(matches!(
            events.first().map(|e| &e.kind),
            Some(SessionEventKind::Generated(_))
        ));
        let unmark_times: Vec<Duration> = events
            .iter()
            .filter(|e| matches!(e.kind, SessionEventKind::Unmarked(_)))
            .map(|e| e.at)
            .collect();
        assert_eq!(
            unmark_times,
            vec![ms(100), ms(200), ms(300), ms(400), ms(500)]
        );
    }

    // Tests total revert duration
    #[test]
    fn test_timing_total() {
        let timing = RevertTiming::default();
        assert_eq!(timing.total(5), ms(6000));
        assert_eq!(RevertTiming::uniform(ms(10)).total(1), ms(20));
    }

    // Tests which phases accept clicks
    #[test]
    fn test_phase_accepts_clicks() {
        assert!(Phase::Idle.accepts_clicks());
        assert!(Phase::Active.accepts_clicks());
        assert!(!Phase::Complete.accepts_clicks());
        assert!(!Phase::Reverting.accepts_clicks());
    }

    // Tests rejected text is left to the caller to report
    // Verified by logging rejections at warn level
    #[test]
    fn test_rejection_is_not_a_warning() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber =
            tracing_subscriber::registry().with(WarningCounter(Arc::clone(&warnings)));

        tracing::subscriber::with_default(subscriber, || {
            let mut controller = Controller::default();
            for text in ["", "seven", "4", "1e1"] {
                assert!(controller.submit(text).is_err());
            }
        });

        assert_eq!(warnings.load(Ordering::SeqCst), 0);
    }
}
