//! Bitfield vs. flag-mask packing experiment
//!
//! Two packings of the same neighbor-table entry, to compare what packing
//! the sub-byte fields into one word buys over keeping each field in its
//! own. `NibEntryFlags` packs everything into a `u32` behind mask/shift
//! accessors; `NibEntryWide` spends a field per value. The bitfield-test
//! app prints both sizes.

/// Neighbor unreachability detection states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NudState {
    Unmanaged = 0,
    Unreachable = 1,
    Incomplete = 2,
    Stale = 3,
    Delay = 4,
    Probe = 5,
    Reachable = 6,
}

impl NudState {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Unreachable,
            2 => Self::Incomplete,
            3 => Self::Stale,
            4 => Self::Delay,
            5 => Self::Probe,
            6 => Self::Reachable,
            _ => Self::Unmanaged,
        }
    }
}

/// 6LoWPAN address registration states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ArState {
    None = 0,
    Gc = 1,
    Tentative = 2,
    Registered = 3,
}

impl ArState {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Gc,
            2 => Self::Tentative,
            3 => Self::Registered,
            _ => Self::None,
        }
    }
}

const PFX_LEN_MASK: u32 = 0x0000_00ff;
const L2ADDR_LEN_MASK: u32 = 0x0000_0f00;
const L2ADDR_LEN_POS: u32 = 8;
const NUD_STATE_MASK: u32 = 0x0000_7000;
const NUD_STATE_POS: u32 = 12;
const IS_ROUTER: u32 = 0x0000_8000;
const IFACE_MASK: u32 = 0x001f_0000;
const IFACE_POS: u32 = 16;
const AR_STATE_MASK: u32 = 0x0060_0000;
const AR_STATE_POS: u32 = 21;
const USE_FOR_COMP: u32 = 0x0080_0000;
const CID_MASK: u32 = 0x0f00_0000;
const CID_POS: u32 = 24;

/// All sub-byte fields packed into one `u32` of flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NibEntryFlags {
    pub dst: [u8; 16],
    pub next_hop: [u8; 16],
    pub l2addr: [u8; 8],
    flags: u32,
}

impl NibEntryFlags {
    pub fn pfx_len(&self) -> u8 {
        (self.flags & PFX_LEN_MASK) as u8
    }

    pub fn set_pfx_len(&mut self, len: u8) {
        self.flags = (self.flags & !PFX_LEN_MASK) | (len as u32 & PFX_LEN_MASK);
    }

    pub fn l2addr_len(&self) -> u8 {
        ((self.flags & L2ADDR_LEN_MASK) >> L2ADDR_LEN_POS) as u8
    }

    pub fn set_l2addr_len(&mut self, len: u8) {
        self.flags =
            (self.flags & !L2ADDR_LEN_MASK) | (((len as u32) << L2ADDR_LEN_POS) & L2ADDR_LEN_MASK);
    }

    pub fn nud_state(&self) -> NudState {
        NudState::from_bits((self.flags & NUD_STATE_MASK) >> NUD_STATE_POS)
    }

    pub fn set_nud_state(&mut self, state: NudState) {
        self.flags = (self.flags & !NUD_STATE_MASK)
            | (((state as u32) << NUD_STATE_POS) & NUD_STATE_MASK);
    }

    pub fn is_router(&self) -> bool {
        self.flags & IS_ROUTER != 0
    }

    pub fn set_is_router(&mut self, val: bool) {
        if val {
            self.flags |= IS_ROUTER;
        } else {
            self.flags &= !IS_ROUTER;
        }
    }

    pub fn iface(&self) -> u8 {
        ((self.flags & IFACE_MASK) >> IFACE_POS) as u8
    }

    pub fn set_iface(&mut self, iface: u8) {
        self.flags = (self.flags & !IFACE_MASK) | (((iface as u32) << IFACE_POS) & IFACE_MASK);
    }

    pub fn ar_state(&self) -> ArState {
        ArState::from_bits((self.flags & AR_STATE_MASK) >> AR_STATE_POS)
    }

    pub fn set_ar_state(&mut self, state: ArState) {
        self.flags =
            (self.flags & !AR_STATE_MASK) | (((state as u32) << AR_STATE_POS) & AR_STATE_MASK);
    }

    pub fn use_for_comp(&self) -> bool {
        self.flags & USE_FOR_COMP != 0
    }

    pub fn set_use_for_comp(&mut self, val: bool) {
        if val {
            self.flags |= USE_FOR_COMP;
        } else {
            self.flags &= !USE_FOR_COMP;
        }
    }

    pub fn cid(&self) -> u8 {
        ((self.flags & CID_MASK) >> CID_POS) as u8
    }

    pub fn set_cid(&mut self, cid: u8) {
        self.flags = (self.flags & !CID_MASK) | (((cid as u32) << CID_POS) & CID_MASK);
    }
}

/// Same entry with one plain field per value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NibEntryWide {
    pub dst: [u8; 16],
    pub next_hop: [u8; 16],
    pub l2addr: [u8; 8],
    pub pfx_len: u8,
    pub l2addr_len: u8,
    pub nud_state: u8,
    pub is_router: bool,
    pub iface: u8,
    pub ar_state: u8,
    pub use_for_comp: bool,
    pub cid: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    #[test]
    fn packed_is_smaller() {
        assert!(size_of::<NibEntryFlags>() < size_of::<NibEntryWide>());
        assert_eq!(size_of::<NibEntryFlags>(), 44);
    }

    #[test]
    fn fields_roundtrip() {
        let mut e = NibEntryFlags::default();
        e.set_pfx_len(45);
        e.set_l2addr_len(3);
        e.set_nud_state(NudState::Stale);
        e.set_is_router(true);
        e.set_iface(5);
        e.set_ar_state(ArState::Tentative);
        e.set_use_for_comp(true);
        e.set_cid(0x6);

        assert_eq!(e.pfx_len(), 45);
        assert_eq!(e.l2addr_len(), 3);
        assert_eq!(e.nud_state(), NudState::Stale);
        assert!(e.is_router());
        assert_eq!(e.iface(), 5);
        assert_eq!(e.ar_state(), ArState::Tentative);
        assert!(e.use_for_comp());
        assert_eq!(e.cid(), 0x6);
    }

    #[test]
    fn setters_do_not_disturb_neighbors() {
        let mut e = NibEntryFlags::default();
        e.set_pfx_len(0xff);
        e.set_iface(0x1f);
        e.set_cid(0xf);
        e.set_l2addr_len(0);
        assert_eq!(e.pfx_len(), 0xff);
        assert_eq!(e.iface(), 0x1f);
        assert_eq!(e.cid(), 0xf);
        assert_eq!(e.l2addr_len(), 0);
    }
}
