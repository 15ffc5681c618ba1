use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::events::SessionEvent;
use crate::session::{GameSession, PointerSample, SessionPhase};

/// Drives a [`GameSession`] resource from the Bevy schedule.
///
/// The host inserts the session (still in Setup) and sends [`PointerSample`]
/// events; the plugin starts it, ticks it with [`Time`] and republishes its
/// notifications as [`SessionEvent`]s.
pub struct Puzzle15Plugin;

#[derive(Resource, Clone, Default)]
struct SessionInbox(Arc<Mutex<Vec<SessionEvent>>>);

impl Plugin for Puzzle15Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionInbox>()
            .add_event::<PointerSample>()
            .add_event::<SessionEvent>()
            .add_systems(
                Update,
                (
                    (start_pending_session, feed_pointer_samples, tick_session)
                        .chain()
                        .run_if(resource_exists::<GameSession>),
                    forward_session_events,
                )
                    .chain(),
            );
    }
}

fn start_pending_session(mut session: ResMut<GameSession>, inbox: Res<SessionInbox>) {
    if session.phase() != SessionPhase::Setup || session.is_disposed() {
        return;
    }
    let sink = Arc::clone(&inbox.0);
    session.subscribe(move |event| sink.lock().push(event.clone()));
    session.start();
}

fn feed_pointer_samples(
    mut session: ResMut<GameSession>,
    mut samples: EventReader<PointerSample>,
) {
    for sample in samples.read() {
        session.handle_pointer(*sample);
    }
}

fn tick_session(mut session: ResMut<GameSession>, time: Res<Time>) {
    session.tick(time.delta());
}

fn forward_session_events(inbox: Res<SessionInbox>, mut writer: EventWriter<SessionEvent>) {
    let drained: Vec<SessionEvent> = inbox.0.lock().drain(..).collect();
    if !drained.is_empty() {
        writer.send_batch(drained);
    }
}
