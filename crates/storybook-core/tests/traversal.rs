use std::time::Duration;

use storybook_core::*;

const FRAME: Duration = Duration::from_millis(16);

fn two_chapter_story() -> Story {
    Story::from_json(
        r#"{
            "cover": { "main_title": "Two Chapters", "subtitle": "", "author_line": "" },
            "chapters": [
                { "id": "one", "title": "One", "subtitle": "First", "content": "Opening lines." },
                { "id": "two", "title": "Two", "subtitle": "Second", "content": "Closing lines.",
                  "quote": "Fin." }
            ],
            "interludes": [
                { "after_chapter": 0, "images": [
                    { "url": "a.jpg", "duration_ms": 3000 },
                    { "url": "b.jpg", "duration_ms": 3000 },
                    { "url": "c.jpg", "duration_ms": 3000 }
                ] }
            ],
            "ending": { "title": "The End", "message": "", "signature": "", "final_quote": "" }
        }"#,
    )
    .unwrap()
}

/// Drive by frames until `done` holds, collecting events. Panics after an
/// hour of simulated time.
fn drive_until(
    book: &mut Storybook,
    clock: &ManualClock,
    mut done: impl FnMut(&Storybook, &[StoryEvent]) -> bool,
) -> Vec<StoryEvent> {
    let mut events = Vec::new();
    while !done(book, &events) {
        assert!(clock.now() < Duration::from_secs(3600), "storybook stalled");
        clock.advance(FRAME);
        events.extend(book.advance(clock.now()));
    }
    events
}

/// Advance exactly to each deadline until the storybook finishes.
fn drive_by_deadlines(book: &mut Storybook) -> Vec<StoryEvent> {
    let mut events = Vec::new();
    while let Some(at) = book.next_deadline() {
        events.extend(book.advance(at));
    }
    events
}

fn phases(events: &[StoryEvent]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|event| match event {
            StoryEvent::PhaseChanged(phase) => Some(*phase),
            _ => None,
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Scenario: two chapters, three-image interlude after the first
// ----------------------------------------------------------------------------

#[test]
fn test_two_chapters_with_swiped_interlude() {
    storybook_logging::init_testing();
    let clock = ManualClock::new();
    let mut book = Storybook::new(two_chapter_story());
    assert_eq!(book.story().total_steps(), 3);

    let mut events = book.start(clock.now());
    assert_eq!(events, vec![StoryEvent::CoverExiting]);

    events.extend(drive_until(&mut book, &clock, |b, _| b.phase() == Phase::Chapter(0)));
    assert_eq!(book.progress(), Some(1.0 / 3.0));

    events.extend(drive_until(&mut book, &clock, |b, _| {
        b.interlude().phase() == InterludePhase::Showing
    }));
    assert_eq!(book.phase(), Phase::Interlude(0));
    assert_eq!(book.progress(), Some(2.0 / 3.0));

    // Two forward swipes: a touch drag, then a mouse drag.
    book.pointer_start(PointerKind::Touch, 400.0);
    book.pointer_move(360.0);
    book.pointer_move(250.0);
    events.extend(book.pointer_end(None, clock.now()));
    events.extend(drive_until(&mut book, &clock, |b, _| {
        b.interlude().phase() == InterludePhase::Showing
    }));
    assert_eq!(book.interlude().index(), 1);

    book.pointer_start(PointerKind::Mouse, 600.0);
    events.extend(book.pointer_end(Some(480.0), clock.now()));
    events.extend(drive_until(&mut book, &clock, |b, _| {
        b.interlude().phase() == InterludePhase::Showing
    }));
    assert_eq!(book.interlude().index(), 2);
    assert_eq!(book.interlude().dots(), vec![false, false, true]);

    // The last image times out on its own.
    events.extend(drive_until(&mut book, &clock, |b, _| b.phase() == Phase::Chapter(1)));
    assert_eq!(book.progress(), Some(1.0));
    assert_eq!(book.current_chapter(), 1);

    events.extend(drive_until(&mut book, &clock, |b, _| b.is_finished()));
    assert_eq!(book.progress(), None);
    assert!(book.ending().is_active());

    assert_eq!(
        phases(&events),
        vec![Phase::Chapter(0), Phase::Interlude(0), Phase::Chapter(1), Phase::Ending]
    );
    let images: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            StoryEvent::ImageChanged { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(images, vec![1, 2]);
    let finished = events.iter().filter(|e| **e == StoryEvent::Finished).count();
    assert_eq!(finished, 1);

    // Nothing left to do.
    assert_eq!(book.next_deadline(), None);
    clock.advance(Duration::from_secs(60));
    assert!(book.advance(clock.now()).is_empty());
}

#[test]
fn test_swipe_back_on_first_image_is_ignored() {
    storybook_logging::init_testing();
    let clock = ManualClock::new();
    let mut book = Storybook::new(two_chapter_story());
    book.start(clock.now());
    drive_until(&mut book, &clock, |b, _| b.phase() == Phase::Interlude(0));

    book.pointer_start(PointerKind::Touch, 100.0);
    let events = book.pointer_end(Some(400.0), clock.now());
    assert!(events.iter().all(|e| !matches!(e, StoryEvent::ImageChanged { .. })));
    assert_eq!(book.interlude().index(), 0);
    assert!(book.interlude().slide_direction().is_none());
}

// ----------------------------------------------------------------------------
// Sample story
// ----------------------------------------------------------------------------

#[test]
fn test_sample_story_visits_every_step_once() {
    storybook_logging::init_testing();
    let mut book = Storybook::new(Story::sample().unwrap());
    book.start(Duration::ZERO);
    let events = drive_by_deadlines(&mut book);

    assert_eq!(
        phases(&events),
        vec![
            Phase::Chapter(0),
            Phase::Interlude(0),
            Phase::Chapter(1),
            Phase::Chapter(2),
            Phase::Interlude(2),
            Phase::Chapter(3),
            Phase::Ending,
        ]
    );
    assert!(book.is_finished());
}

#[test]
fn test_coarse_and_fine_driving_agree() {
    storybook_logging::init_testing();
    let story = Story::sample().unwrap();

    let mut fine = Storybook::new(story.clone());
    let mut fine_events = fine.start(Duration::ZERO);
    fine_events.extend(drive_by_deadlines(&mut fine));

    let clock = ManualClock::new();
    let mut framed = Storybook::new(story.clone());
    let mut framed_events = framed.start(clock.now());
    framed_events.extend(drive_until(&mut framed, &clock, |b, _| b.is_finished()));

    let mut coarse = Storybook::new(story);
    let mut coarse_events = coarse.start(Duration::ZERO);
    coarse_events.extend(coarse.advance(Duration::from_secs(3600)));

    assert_eq!(fine_events, coarse_events);
    assert_eq!(fine_events, framed_events);
}

#[test]
fn test_speed_shortens_the_traversal() {
    storybook_logging::init_testing();
    fn finish_time(story: Story) -> Duration {
        let mut book = Storybook::new(story);
        book.start(Duration::ZERO);
        let mut last = Duration::ZERO;
        while let Some(at) = book.next_deadline() {
            book.advance(at);
            last = at;
        }
        last
    }

    let story = Story::sample().unwrap();
    let normal = finish_time(story.clone());
    let fast = finish_time(story.scaled(4.0));
    assert!(fast < normal / 3, "fast={fast:?} normal={normal:?}");
}

// ----------------------------------------------------------------------------
// Chapter edge cases
// ----------------------------------------------------------------------------

#[test]
fn test_empty_body_completes_without_caret() {
    storybook_logging::init_testing();
    let mut book = Storybook::new(
        Story::from_json(
            r#"{
                "cover": { "main_title": "Blank", "subtitle": "", "author_line": "" },
                "chapters": [ { "id": "blank", "title": "Blank", "subtitle": "", "content": "" } ],
                "ending": { "title": "End", "message": "", "signature": "", "final_quote": "" }
            }"#,
        )
        .unwrap(),
    );
    book.start(Duration::ZERO);
    while let Some(at) = book.next_deadline() {
        book.advance(at);
        assert!(!book.chapter().body().shows_caret());
        assert!(!book.chapter().subtitle().shows_caret());
    }
    assert!(book.is_finished());
}

#[test]
fn test_story_json_errors_are_typed() {
    storybook_logging::init_testing();
    let err = Story::from_json(r#"{ "cover": {} }"#).unwrap_err();
    assert!(matches!(err, StoryError::Parse(_)));

    let err = Story::from_json(
        r#"{
            "cover": { "main_title": "", "subtitle": "", "author_line": "" },
            "chapters": [],
            "ending": { "title": "", "message": "", "signature": "", "final_quote": "" }
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, StoryError::Content(ContentError::NoChapters)));

    let err = Story::load("/definitely/not/a/story.json").unwrap_err();
    assert!(matches!(err, StoryError::Io(_)));
}
