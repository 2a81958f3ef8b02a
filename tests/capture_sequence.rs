//! Capture-result streams replayed through the state machine.
//!
//! Each stream is what a device would report frame by frame (about 33 ms
//! apart). The test checks the sequence of requests the machine asks for.

use zencamera::*;

const FRAME_MS: u64 = 33;

fn replay(
    machine: &mut CaptureStateMachine,
    start_ms: u64,
    frames: &[(Option<AfState>, Option<AeState>)],
) -> Vec<CaptureAction> {
    let mut actions = Vec::new();
    for (i, &(af, ae)) in frames.iter().enumerate() {
        let now = start_ms + i as u64 * FRAME_MS;
        if let Some(action) = machine.process(CaptureResult::new(af, ae), now) {
            if action == CaptureAction::RunPrecapture {
                machine.precapture_started();
            }
            actions.push(action);
        }
    }
    actions
}

#[test]
fn dim_scene_with_flash() {
    use AeState::*;
    use AfState::*;
    let mut m = CaptureStateMachine::default();
    assert_eq!(m.request_capture(), CaptureAction::LockFocus);
    let actions = replay(
        &mut m,
        0,
        &[
            (Some(ActiveScan), Some(Searching)),
            (Some(ActiveScan), Some(Searching)),
            (Some(FocusedLocked), Some(FlashRequired)),
            (Some(FocusedLocked), Some(Searching)),
            (Some(FocusedLocked), Some(Precapture)),
            (Some(FocusedLocked), Some(Precapture)),
            (Some(FocusedLocked), Some(Converged)),
            (Some(FocusedLocked), Some(Converged)),
        ],
    );
    assert_eq!(
        actions,
        [CaptureAction::RunPrecapture, CaptureAction::CaptureStill]
    );
    assert_eq!(m.state(), CaptureState::Capturing);
    assert_eq!(m.capture_completed(), CaptureAction::UnlockFocus);
}

#[test]
fn fixed_focus_device_without_metadata() {
    let config = NegotiationConfig::default().auto_focus(false);
    let mut m = CaptureStateMachine::new(&config);
    // No focus lock to wait for: the still is requested immediately.
    assert_eq!(m.request_capture(), CaptureAction::CaptureStill);
    assert_eq!(m.state(), CaptureState::Capturing);
    let actions = replay(&mut m, 0, &[(None, None), (None, None)]);
    assert!(actions.is_empty());
    assert_eq!(m.capture_completed(), CaptureAction::UnlockFocus);
    assert_eq!(m.state(), CaptureState::Preview);
}

#[test]
fn auto_focus_without_metadata_keeps_locking() {
    let mut m = CaptureStateMachine::default();
    m.request_capture();
    // Auto-focus on but no AF state reported: the lock never completes.
    let actions = replay(&mut m, 0, &[(None, None), (None, None)]);
    assert!(actions.is_empty());
    assert_eq!(m.state(), CaptureState::Locking);
}

#[test]
fn preview_refocus_cycle() {
    use AfState::*;
    let mut m = CaptureStateMachine::default();
    // Lock succeeds at t=0, so the unlock is due after 10 s.
    let actions = replay(&mut m, 0, &[(Some(FocusedLocked), None)]);
    assert!(actions.is_empty());

    let frames = vec![(Some(FocusedLocked), None); 400];
    let actions = replay(&mut m, FRAME_MS, &frames);
    assert_eq!(actions, [CaptureAction::UnlockFocus]);
    assert_eq!(m.unlock_deadline(), None);

    // The camera drops back to inactive; a lock is requested on the next frame.
    let t = FRAME_MS * 401;
    let actions = replay(&mut m, t, &[(Some(Inactive), None), (Some(Inactive), None)]);
    assert_eq!(actions, [CaptureAction::LockFocus]);
}
