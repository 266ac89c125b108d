use crate::canvas::Canvas;
use crate::light::LightState;
use crate::transform::Transform;
use crate::{Network, Snapshot, Style};

/// Finds the first controller, in order of ID, that has a state in the snapshot.
pub(super) fn active_signal<'a>(
    network: &'a Network,
    snapshot: &'a Snapshot,
) -> Option<(&'a str, &'a str)> {
    network
        .signals()
        .find_map(|(id, _)| Some((id, snapshot.signal_state(id)?)))
}

/// Draws an indicator at the start of each lane governed by the active controller.
///
/// Links beyond the end of the state string, with an unrecognised state,
/// or whose lane cannot be found are skipped.
pub(super) fn draw(
    canvas: &mut dyn Canvas,
    network: &Network,
    snapshot: &Snapshot,
    transform: &Transform,
    style: &Style,
) {
    let Some((id, state)) = active_signal(network, snapshot) else {
        return;
    };
    let Some(controller) = network.signal(id) else {
        return;
    };
    let states = LightState::parse_all(state);

    for link in &controller.links {
        let Some(Some(light)) = states.get(link.index) else {
            continue;
        };
        let Some(lane_id) = link.lane.as_deref() else {
            continue;
        };
        let Some(lane) = network.lane(lane_id) else {
            log::debug!("Signal {:?} link {} governs unknown lane {:?}", id, link.index, lane_id);
            continue;
        };
        let Some(start) = lane.shape.first() else {
            continue;
        };
        canvas.fill_circle(transform.apply(*start), style.signal_radius, style.light_color(*light));
    }
}
