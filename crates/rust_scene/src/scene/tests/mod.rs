//! Scenario tests across nodes, components, animators and the visit pass

mod animation;
