use folio_motion_core::{
    AnimationRole, CoreEvent, HostEvent, Inputs, ModalEffect, ModalEvent, MotionConfig, Phase,
    Stage, TargetId,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn stage() -> Stage {
    Stage::new(MotionConfig::default()).expect("default config")
}

fn one(event: HostEvent) -> Inputs {
    Inputs::from(vec![event])
}

#[test]
fn section_reveal_enter_and_exit() {
    let mut st = stage();
    let hero = st.register_section(AnimationRole::CenterScale, 0.0).unwrap();

    let out = st.update(0.0, Inputs::default());
    approx(out.change_for(hero).expect("initial hidden").opacity, 0.0, 0.0);

    // Observer reports before arming are held back.
    st.update(100.0, one(HostEvent::Intersection { target: hero, intersecting: true }));
    assert_eq!(st.phase(hero), Some(Phase::Hidden));

    let out = st.update(700.0, Inputs::default());
    assert!(out.events.contains(&CoreEvent::SectionArmed { target: hero }));
    assert_eq!(st.phase(hero), Some(Phase::Entering));
    approx(st.visual(hero).unwrap().scale, 0.3, 1e-6);

    st.update(1300.0, Inputs::default());
    let v = st.visual(hero).unwrap();
    approx(v.scale, 0.9125, 1e-5);
    approx(v.opacity, 0.5, 1e-6);

    let out = st.update(1900.0, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::TweenFinished { target, .. } if *target == hero)));
    assert_eq!(st.phase(hero), Some(Phase::Visible));
    assert_eq!(st.visual(hero).unwrap().scale, 1.0);

    st.update(2000.0, one(HostEvent::Intersection { target: hero, intersecting: false }));
    assert_eq!(st.phase(hero), Some(Phase::Exiting));
    st.update(2700.0, Inputs::default());
    assert_eq!(st.phase(hero), Some(Phase::Hidden));
    let v = st.visual(hero).unwrap();
    approx(v.opacity, 0.0, 0.0);
    approx(v.scale, 0.2, 0.0);

    // Restartable.
    st.update(3000.0, one(HostEvent::Intersection { target: hero, intersecting: true }));
    assert_eq!(st.phase(hero), Some(Phase::Entering));
}

#[test]
fn sections_arm_with_index_stagger() {
    let mut st = stage();
    let a = st.register_section(AnimationRole::CenterScale, 0.0).unwrap();
    let b = st.register_section(AnimationRole::SlideLeft, 0.0).unwrap();
    let c = st.register_section(AnimationRole::SlideRight, 0.0).unwrap();

    let out = st.update(729.0, Inputs::default());
    let armed: Vec<_> = out
        .events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::SectionArmed { target } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(armed, vec![a]);
    assert!(!st.is_idle());

    let out = st.update(760.0, Inputs::default());
    assert!(out.events.contains(&CoreEvent::SectionArmed { target: b }));
    assert!(out.events.contains(&CoreEvent::SectionArmed { target: c }));
    assert!(st.is_idle());
}

#[test]
fn exit_interrupting_entrance_starts_from_current_values() {
    let mut st = stage();
    let web = st.register_section(AnimationRole::SlideLeft, 0.0).unwrap();
    st.update(700.0, one(HostEvent::Intersection { target: web, intersecting: true }));
    st.update(1250.0, Inputs::default());
    let mid = *st.visual(web).unwrap();
    assert!(mid.translate_x < 0.0 && mid.translate_x > -80.0);

    st.update(1260.0, one(HostEvent::Intersection { target: web, intersecting: false }));
    // The exit replaces the entrance and starts where it left off.
    assert_eq!(st.running_tweens(), 1);
    let v = *st.visual(web).unwrap();
    approx(v.translate_x, mid.translate_x, 1e-6);
    approx(v.opacity, mid.opacity, 1e-6);

    st.update(1910.0, Inputs::default());
    let v = st.visual(web).unwrap();
    approx(v.translate_x, -60.0, 0.0);
    approx(v.scale, 0.7, 0.0);
    assert_eq!(st.phase(web), Some(Phase::Hidden));
}

#[test]
fn short_exit_outlasting_entrance_keeps_section_hidden() {
    let mut st = stage();
    let web = st.register_section(AnimationRole::SlideLeft, 0.0).unwrap();
    st.update(700.0, one(HostEvent::Intersection { target: web, intersecting: true }));
    st.update(750.0, one(HostEvent::Intersection { target: web, intersecting: false }));

    let out = st.update(1400.0, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::TweenFinished { target, .. } if *target == web)));
    assert_eq!(st.phase(web), Some(Phase::Hidden));
    assert!(st.is_idle());

    // The 1100ms entrance would have ended here had it kept running.
    let out = st.update(1800.0, Inputs::default());
    assert!(out.change_for(web).is_none());
    assert_eq!(st.phase(web), Some(Phase::Hidden));
    let v = st.visual(web).unwrap();
    approx(v.opacity, 0.0, 0.0);
    approx(v.translate_x, -60.0, 0.0);
    approx(v.scale, 0.7, 0.0);
}

#[test]
fn hover_reversal_drops_the_lift() {
    let mut st = stage();
    let card = st.register_hover();
    st.update(0.0, one(HostEvent::PointerEnter { target: card }));
    st.update(50.0, one(HostEvent::PointerLeave { target: card }));
    assert_eq!(st.running_tweens(), 1);
    st.update(270.0, Inputs::default());
    let v = st.visual(card).unwrap();
    assert_eq!((v.translate_y, v.scale), (0.0, 1.0));
    assert!(st.is_idle());
}

#[test]
fn hover_lift_and_settle() {
    let mut st = stage();
    let card = st.register_hover();
    st.update(0.0, Inputs::default());

    st.update(10.0, one(HostEvent::PointerEnter { target: card }));
    st.update(120.0, Inputs::default());
    let v = *st.visual(card).unwrap();
    approx(v.translate_y, -6.0 * 0.875, 1e-4);
    approx(v.scale, 1.0 + 0.02 * 0.875, 1e-5);

    st.update(230.0, Inputs::default());
    approx(st.visual(card).unwrap().translate_y, -6.0, 0.0);

    st.update(300.0, one(HostEvent::PointerLeave { target: card }));
    st.update(520.0, Inputs::default());
    let v = st.visual(card).unwrap();
    assert_eq!((v.translate_y, v.scale), (0.0, 1.0));
    assert!(st.is_idle());
}

#[test]
fn carousel_advances_and_pauses_on_hover() {
    let mut st = stage();
    let track = st.attach_carousel(400.0);
    for i in 0..250 {
        st.update(f64::from(i) * 16.0, Inputs::default());
    }
    assert_eq!(st.carousel().unwrap().offset, 50.0);
    approx(st.visual(track).unwrap().translate_x, -50.0, 0.0);

    st.update(5000.0, one(HostEvent::PointerEnter { target: track }));
    for _ in 0..30 {
        let out = st.update(5016.0, Inputs::default());
        assert!(out.change_for(track).is_none());
    }
    assert!(st.carousel().unwrap().paused);
    assert_eq!(st.carousel().unwrap().offset, 50.0);
    assert!(st.is_idle());

    st.update(6000.0, one(HostEvent::PointerLeave { target: track }));
    assert_eq!(st.carousel().unwrap().offset, 51.0);
    assert!(!st.is_idle());

    st.set_carousel_running(false);
    st.update(6016.0, Inputs::default());
    assert_eq!(st.carousel().unwrap().offset, 51.0);
}

#[test]
fn anchor_scroll_animates_viewport() {
    let mut st = stage();
    let vp = st.viewport();
    let out = st.update(
        1000.0,
        one(HostEvent::ScrollRequest {
            current_y: 100.0,
            target_top: 1220.0,
        }),
    );
    assert_eq!(
        out.events,
        vec![CoreEvent::ScrollTo {
            from_y: 100.0,
            target_y: 1100.0
        }]
    );
    assert_eq!(st.running_tweens(), 1);
    approx(st.visual(vp).unwrap().scroll_y, 100.0, 0.0);

    st.update(1500.0, Inputs::default());
    approx(st.visual(vp).unwrap().scroll_y, 100.0 + 1000.0 * 0.5, 1e-3);

    st.update(2000.0, Inputs::default());
    approx(st.visual(vp).unwrap().scroll_y, 1100.0, 0.0);
}

#[test]
fn modal_effects_are_reported() {
    let mut st = stage();
    let out = st.update(0.0, one(HostEvent::Modal(ModalEvent::TriggerClicked)));
    assert_eq!(
        out.events,
        vec![CoreEvent::ModalOpened]
    );
    assert_eq!(out.events[0].modal_effect(), Some(ModalEffect { open: true }));
    assert!(st.modal_open());

    let out = st.update(
        16.0,
        one(HostEvent::Modal(ModalEvent::KeyPressed("Escape".into()))),
    );
    assert_eq!(
        out.events,
        vec![CoreEvent::ModalClosed]
    );
    assert_eq!(
        out.events[0].modal_effect().map(|e| e.display()),
        Some("none")
    );

    let out = st.update(32.0, one(HostEvent::Modal(ModalEvent::BackdropClicked)));
    assert!(out.events.is_empty());
}

#[test]
fn escape_queued_behind_trigger_closes_in_the_same_frame() {
    let mut st = stage();
    let out = st.update(
        0.0,
        Inputs::from(vec![
            HostEvent::Modal(ModalEvent::TriggerClicked),
            HostEvent::Modal(ModalEvent::KeyPressed("Escape".into())),
        ]),
    );
    assert_eq!(out.events, vec![CoreEvent::ModalOpened, CoreEvent::ModalClosed]);
    assert!(!st.modal_open());
}

#[test]
fn page_and_chrome_fades_are_staggered() {
    let mut st = stage();
    let body = st.register_page_fade().unwrap();
    let header = st.register_chrome().unwrap();
    let footer = st.register_chrome().unwrap();

    st.update(0.0, Inputs::default());
    st.update(550.0, Inputs::default());
    assert!(st.visual(body).unwrap().opacity > 0.0);
    assert_eq!(st.visual(header).unwrap().opacity, 0.0);

    st.update(700.0, Inputs::default());
    assert!(st.visual(header).unwrap().opacity > 0.0);
    assert_eq!(st.visual(footer).unwrap().opacity, 0.0);

    st.update(1600.0, Inputs::default());
    assert_eq!(st.visual(body).unwrap().opacity, 1.0);
    assert_eq!(st.visual(header).unwrap().opacity, 1.0);
    assert_eq!(st.visual(footer).unwrap().opacity, 1.0);
    assert!(st.is_idle());
}

#[test]
fn unknown_targets_are_tolerated() {
    let mut st = stage();
    let out = st.update(
        0.0,
        Inputs::from(vec![
            HostEvent::PointerEnter {
                target: TargetId(42),
            },
            HostEvent::Intersection {
                target: TargetId(43),
                intersecting: true,
            },
        ]),
    );
    assert!(out.is_empty());
}

#[test]
fn inputs_and_outputs_round_trip_json() {
    let inputs: Inputs = serde_json::from_str(
        r#"{ "events": [
            { "intersection": { "target": 1, "intersecting": true } },
            { "modal": "trigger_clicked" },
            { "modal": { "key_pressed": "Escape" } }
        ] }"#,
    )
    .unwrap();
    assert_eq!(inputs.events.len(), 3);
    assert_eq!(
        inputs.events[2],
        HostEvent::Modal(ModalEvent::KeyPressed("Escape".into()))
    );

    let mut st = stage();
    let out = st.update(0.0, inputs);
    let json = serde_json::to_value(out).unwrap();
    assert!(json["events"].is_array());
    assert!(json["changes"].is_array());
}
