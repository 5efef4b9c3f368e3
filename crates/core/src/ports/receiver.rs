//! Receiver channel groups
//!
//! Frame decoders (S.Bus, DSM, HoTT SUM, PWM, PPM, GCS) register a receiver
//! handle under a channel group. Manual control later reads stick inputs
//! through the group it was told to use.

use crate::handle::RcvrHandle;

/// Receiver input bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelGroup {
    Pwm,
    Ppm,
    /// DSM satellite (every DSM port registers here)
    DsmMainPort,
    SBus,
    /// Stick input sent by the ground station
    Gcs,
    HottSum,
}

impl ChannelGroup {
    /// Number of groups
    pub const COUNT: usize = 6;

    /// Every group in map order
    pub const ALL: [ChannelGroup; Self::COUNT] = [
        ChannelGroup::Pwm,
        ChannelGroup::Ppm,
        ChannelGroup::DsmMainPort,
        ChannelGroup::SBus,
        ChannelGroup::Gcs,
        ChannelGroup::HottSum,
    ];

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            ChannelGroup::Pwm => "pwm",
            ChannelGroup::Ppm => "ppm",
            ChannelGroup::DsmMainPort => "dsm_main",
            ChannelGroup::SBus => "sbus",
            ChannelGroup::Gcs => "gcs",
            ChannelGroup::HottSum => "hott_sum",
        }
    }
}

/// Channel group → receiver handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiverGroupMap {
    map: [Option<RcvrHandle>; ChannelGroup::COUNT],
}

impl ReceiverGroupMap {
    /// Create a map with every group empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a receiver under a group, returning the handle it replaced
    pub fn set(&mut self, group: ChannelGroup, handle: RcvrHandle) -> Option<RcvrHandle> {
        self.map[group as usize].replace(handle)
    }

    /// Receiver registered under a group
    pub fn get(&self, group: ChannelGroup) -> Option<RcvrHandle> {
        self.map[group as usize]
    }

    /// Populated groups in map order
    pub fn bound(&self) -> impl Iterator<Item = (ChannelGroup, RcvrHandle)> + '_ {
        ChannelGroup::ALL
            .iter()
            .filter_map(move |g| self.get(*g).map(|h| (*g, h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_starts_empty() {
        let map = ReceiverGroupMap::new();
        assert!(ChannelGroup::ALL.iter().all(|g| map.get(*g).is_none()));
        assert_eq!(map.bound().count(), 0);
    }

    #[test]
    fn test_set_and_replace() {
        let mut map = ReceiverGroupMap::new();
        assert_eq!(map.set(ChannelGroup::SBus, RcvrHandle(3)), None);
        assert_eq!(map.set(ChannelGroup::SBus, RcvrHandle(4)), Some(RcvrHandle(3)));
        assert_eq!(map.get(ChannelGroup::SBus), Some(RcvrHandle(4)));
        assert_eq!(map.get(ChannelGroup::Ppm), None);
    }

    #[test]
    fn test_group_names_are_unique() {
        for (i, a) in ChannelGroup::ALL.iter().enumerate() {
            for b in &ChannelGroup::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
        assert_eq!(ChannelGroup::DsmMainPort.name(), "dsm_main");
    }

    #[test]
    fn test_group_order_matches_discriminant() {
        for (i, g) in ChannelGroup::ALL.iter().enumerate() {
            assert_eq!(*g as usize, i);
        }
    }
}
