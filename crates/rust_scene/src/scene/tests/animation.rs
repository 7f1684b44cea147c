//! Animator lifecycle and scheduler registration scenarios

use approx::assert_relative_eq;

use super::doubles::{AnimatorEvent, RecordingCamera, RecordingScheduler, SchedulerCall, ScriptedAnimator};
use crate::animators::{Move, Sequence};
use crate::config::SceneConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::scene::{SceneError, SceneGraph, UpdateScheduler};

#[test]
fn test_set_animator_starts_and_schedules() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(3);
    let animator = scene.insert_animator(animator);

    scene.set_animator(node, Some(animator)).unwrap();

    assert_eq!(scene.node(node).unwrap().animator(), Some(animator));
    assert_eq!(scene.animator_node(animator), Some(node));
    assert_eq!(*events.borrow(), vec![AnimatorEvent::Start]);
    assert!(scene.scheduler().is_scheduled(node));
}

#[test]
fn test_replacing_animator_stops_previous() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (first, first_events) = ScriptedAnimator::new(3);
    let (second, second_events) = ScriptedAnimator::new(3);
    let first = scene.insert_animator(first);
    let second = scene.insert_animator(second);

    scene.set_animator(node, Some(first)).unwrap();
    scene.set_animator(node, Some(second)).unwrap();

    assert_eq!(*first_events.borrow(), vec![AnimatorEvent::Start, AnimatorEvent::Stop]);
    assert_eq!(*second_events.borrow(), vec![AnimatorEvent::Start]);
    assert_eq!(scene.animator_node(first), None);
    assert_eq!(scene.animator_node(second), Some(node));
}

#[test]
fn test_setting_same_animator_restarts_it() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(3);
    let animator = scene.insert_animator(animator);

    scene.set_animator(node, Some(animator)).unwrap();
    scene.set_animator(node, Some(animator)).unwrap();

    assert_eq!(*events.borrow(), vec![AnimatorEvent::Start, AnimatorEvent::Start]);
    assert_eq!(scene.animator_node(animator), Some(node));
}

#[test]
fn test_animator_moves_between_nodes() {
    let mut scene = SceneGraph::new();
    let a = scene.create_node();
    let b = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(3);
    let animator = scene.insert_animator(animator);

    scene.set_animator(a, Some(animator)).unwrap();
    scene.set_animator(b, Some(animator)).unwrap();

    assert_eq!(scene.node(a).unwrap().animator(), None);
    assert_eq!(scene.node(b).unwrap().animator(), Some(animator));
    assert_eq!(scene.animator_node(animator), Some(b));
    assert!(!scene.scheduler().is_scheduled(a));
    assert_eq!(
        *events.borrow(),
        vec![AnimatorEvent::Start, AnimatorEvent::Stop, AnimatorEvent::Start]
    );
}

#[test]
fn test_clearing_to_none_still_schedules_until_next_tick() {
    let mut scene = SceneGraph::with_scheduler(SceneConfig::default(), RecordingScheduler::default());
    let node = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(3);
    let animator = scene.insert_animator(animator);
    scene.set_animator(node, Some(animator)).unwrap();

    scene.set_animator(node, None).unwrap();

    assert_eq!(events.borrow().last(), Some(&AnimatorEvent::Stop));
    assert_eq!(scene.animator_node(animator), None);
    assert!(scene.scheduler().is_scheduled(node));

    scene.update(0.1);
    assert!(!scene.scheduler().is_scheduled(node));
    assert_eq!(
        scene.scheduler().calls,
        vec![
            SchedulerCall::Schedule(node),
            SchedulerCall::Schedule(node),
            SchedulerCall::Unschedule(node),
        ]
    );
}

#[test]
fn test_update_runs_until_done() {
    crate::foundation::logging::init_for_tests();
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(2);
    let animator = scene.insert_animator(animator);
    scene.set_animator(node, Some(animator)).unwrap();

    scene.update(0.5);
    assert!(scene.scheduler().is_scheduled(node));
    scene.update(0.25);

    assert_relative_eq!(scene.node(node).unwrap().position(), Vec3::new(0.75, 0.0, 0.0));
    assert_eq!(scene.node(node).unwrap().animator(), None);
    assert_eq!(scene.animator_node(animator), None);
    assert!(!scene.scheduler().is_scheduled(node));
    assert_eq!(
        *events.borrow(),
        vec![
            AnimatorEvent::Start,
            AnimatorEvent::Update(0.5),
            AnimatorEvent::Update(0.25),
            AnimatorEvent::Stop,
        ]
    );

    scene.update(1.0);
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn test_remove_animator_if_current() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (current, _) = ScriptedAnimator::new(3);
    let (other, _) = ScriptedAnimator::new(3);
    let current = scene.insert_animator(current);
    let other = scene.insert_animator(other);
    scene.set_animator(node, Some(current)).unwrap();

    assert!(!scene.remove_animator_if_current(node, other));
    assert!(scene.scheduler().is_scheduled(node));

    assert!(scene.remove_animator_if_current(node, current));
    assert_eq!(scene.node(node).unwrap().animator(), None);
    assert!(!scene.scheduler().is_scheduled(node));
    assert!(!scene.clear_current_animator(node));
}

#[test]
fn test_destroy_animator_releases_node() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    let (animator, events) = ScriptedAnimator::new(3);
    let animator = scene.insert_animator(animator);
    scene.set_animator(node, Some(animator)).unwrap();

    assert!(scene.destroy_animator(animator).is_some());

    assert_eq!(scene.node(node).unwrap().animator(), None);
    assert!(scene.animator(animator).is_none());
    assert_eq!(events.borrow().last(), Some(&AnimatorEvent::Stop));
    assert_eq!(scene.set_animator(node, Some(animator)), Err(SceneError::AnimatorNotFound(animator)));
}

#[test]
fn test_stale_scheduled_nodes_are_dropped() {
    let mut scene = SceneGraph::new();
    let node = scene.create_node();
    scene.destroy_node(node);
    scene.scheduler_mut().schedule_update(node);

    scene.update(0.1);

    assert!(scene.scheduler().is_empty());
}

#[test]
fn test_sequence_drives_node_through_graph() {
    let mut scene = SceneGraph::new();
    let root = scene.create_node();
    let sequence = Sequence::new()
        .then(Move::to(Vec2::new(4.0, 0.0), 1.0))
        .then(Move::to(Vec2::new(4.0, 4.0), 1.0));
    let animator = scene.insert_animator(sequence);
    scene.set_animator(root, Some(animator)).unwrap();

    let camera = RecordingCamera::seeing_everything();
    for _ in 0..4 {
        scene.update(0.5);
        scene.build_draw_queue(root, &camera);
    }

    assert_relative_eq!(scene.node(root).unwrap().world_position(), Vec3::new(4.0, 4.0, 0.0));
    assert_eq!(scene.animator_node(animator), None);
    assert!(scene.scheduler().is_empty());
}
