use lightsync_protocol::{Command, CommandAction, Device, DeviceKind, DeviceState};

/// Derives the target command for one source device, if eligible.
///
/// Eligible means the device is a light with a present, non-empty
/// Hubitat mapping. The action is `on` exactly when the source state
/// is `on`; `off` and `unknown` both map to `off` — the source system
/// reports nothing a third action could express.
pub fn plan_command(device: &Device) -> Option<Command> {
    if device.kind != DeviceKind::Light {
        return None;
    }
    let target_id = device.target_id()?;

    let action = match device.state {
        DeviceState::On => CommandAction::On,
        DeviceState::Off | DeviceState::Unknown => CommandAction::Off,
    };

    Some(Command {
        device_id: target_id.to_string(),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(state: DeviceState, hubitat_id: Option<&str>) -> Device {
        Device {
            id: "L1".into(),
            name: "Kitchen".into(),
            kind: DeviceKind::Light,
            state,
            hubitat_id: hubitat_id.map(str::to_owned),
        }
    }

    #[test]
    fn on_light_maps_to_on_command() {
        let command = plan_command(&light(DeviceState::On, Some("d1"))).unwrap();
        assert_eq!(command.device_id, "d1");
        assert_eq!(command.action, CommandAction::On);
    }

    #[test]
    fn off_light_maps_to_off_command() {
        let command = plan_command(&light(DeviceState::Off, Some("d1"))).unwrap();
        assert_eq!(command.action, CommandAction::Off);
    }

    #[test]
    fn unknown_state_maps_to_off() {
        let command = plan_command(&light(DeviceState::Unknown, Some("d1"))).unwrap();
        assert_eq!(command.action, CommandAction::Off);
    }

    #[test]
    fn non_light_is_ineligible() {
        let device = Device {
            id: "T1".into(),
            name: "Hall".into(),
            kind: DeviceKind::Other,
            state: DeviceState::On,
            hubitat_id: Some("d9".into()),
        };
        assert!(plan_command(&device).is_none());
    }

    #[test]
    fn unmapped_light_is_ineligible() {
        assert!(plan_command(&light(DeviceState::On, None)).is_none());
    }

    #[test]
    fn empty_mapping_is_ineligible() {
        assert!(plan_command(&light(DeviceState::On, Some(""))).is_none());
    }
}
