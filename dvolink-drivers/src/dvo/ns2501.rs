//! NS2501 DVO transmitter (I2C)
//!
//! The National Semiconductor NS2501 converts the display controller's DVO
//! stream to TMDS. It is configured through a small 8-bit register file
//! behind a 7-bit I2C slave address (0x38 on reference boards).
//!
//! # Register access
//!
//! - Read: one transaction of two segments, a 1-byte write of the register
//!   address followed by a 1-byte read.
//! - Write: one segment carrying the register address then the value.
//!
//! Every access is a live bus transaction; nothing is cached.
//!
//! # Probing
//!
//! The chip is identified by the low bytes of its vendor and device ids.
//! Diagnostics stay quiet until both match, so scanning a bus for many
//! candidate chips does not flood the log.
//!
//! The chip runs from its power-on defaults: mode set and DPMS do not
//! touch any register.

use dvolink_core::traits::{ConnectorStatus, DpmsMode, DvoDevice, DvoDriver, ModeStatus};
use dvolink_core::{DisplayMode, DvoError, DvoHandle};
use dvolink_hal::{I2cMessage, I2cTransfer};

/// NS2501 register addresses
pub mod reg {
    /// Vendor id, low byte
    pub const VID_LO: u8 = 0x00;
    /// Vendor id, high byte
    pub const VID_HI: u8 = 0x01;
    /// Device id, low byte
    pub const DID_LO: u8 = 0x02;
    /// Device id, high byte
    pub const DID_HI: u8 = 0x03;
    /// Silicon revision
    pub const REV: u8 = 0x04;
    /// Reserved
    pub const RSVD: u8 = 0x05;
    /// Input frequency, low byte
    pub const FREQ_LO: u8 = 0x06;
    /// Input frequency, high byte
    pub const FREQ_HI: u8 = 0x07;
    /// Control register A
    pub const REG8: u8 = 0x08;
    /// Control register B
    pub const REG9: u8 = 0x09;
    /// Undocumented, written by the vendor programming sequence
    pub const REGA: u8 = 0x0a;
    /// Control register C
    pub const REGC: u8 = 0x0c;
}

/// Control register A (0x08) bits
pub mod reg8 {
    /// Vertical sync enable
    pub const VEN: u8 = 1 << 5;
    /// Horizontal sync enable
    pub const HEN: u8 = 1 << 4;
    /// Data select
    pub const DSEL: u8 = 1 << 3;
    /// Bypass
    pub const BPAS: u8 = 1 << 2;
    /// Reserved
    pub const RSVD: u8 = 1 << 1;
    /// Power down (active low: set means powered)
    pub const PD: u8 = 1 << 0;
}

/// Control register B (0x09) bits
pub mod reg9 {
    /// Low-voltage swing
    pub const VLOW: u8 = 1 << 7;
    /// Monitor sense select
    pub const MSEL_MASK: u8 = 0x7 << 4;
    /// MSEL field offset
    pub const MSEL_SHIFT: u8 = 4;
    /// Termination select
    pub const TSEL: u8 = 1 << 3;
    /// Receiver sense
    pub const RSEN: u8 = 1 << 2;
    /// Reserved
    pub const RSVD: u8 = 1 << 1;
    /// Monitor detect interrupt
    pub const MDI: u8 = 1 << 0;
}

/// Vendor id
pub const NS2501_VID: u16 = 0x1305;

/// Device id
pub const NS2501_DID: u16 = 0x6726;

/// Vendor-recommended programming sequence, as (register, value) pairs
///
/// Only written by [`DvoDevice::mode_set`] when
/// [`Ns2501Config::program_on_mode_set`] is enabled. Reference boards rely
/// on power-on defaults and never send it.
pub const PROGRAMMING_SEQUENCE: [(u8, u8); 5] = [
    (reg::REG8, 0x30),
    (reg::REG9, 0x00),
    (reg::REGA, 0x90),
    (reg::REGC, 0x89),
    (reg::REG8, 0x31),
];

/// Registers reported by [`DvoDevice::dump_regs`], in order
const DUMP_REGS: [(u8, &str); 5] = [
    (reg::FREQ_LO, "NS2501_FREQ_LO"),
    (reg::FREQ_HI, "NS2501_FREQ_HI"),
    (reg::REG8, "NS2501_REG8"),
    (reg::REG9, "NS2501_REG9"),
    (reg::REGC, "NS2501_REGC"),
];

/// NS2501 driver configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ns2501Config {
    /// Send [`PROGRAMMING_SEQUENCE`] on every mode set
    pub program_on_mode_set: bool,
}

/// Parsed control register A
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlA {
    /// Vertical sync enabled
    pub ven: bool,
    /// Horizontal sync enabled
    pub hen: bool,
    /// Data select
    pub dsel: bool,
    /// Bypass
    pub bpas: bool,
    /// Power-down bit
    pub pd: bool,
}

impl ControlA {
    /// Parse from raw register value
    pub fn from_register(value: u8) -> Self {
        Self {
            ven: value & reg8::VEN != 0,
            hen: value & reg8::HEN != 0,
            dsel: value & reg8::DSEL != 0,
            bpas: value & reg8::BPAS != 0,
            pd: value & reg8::PD != 0,
        }
    }
}

/// Parsed control register B
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlB {
    /// Low-voltage swing
    pub vlow: bool,
    /// Monitor sense select (0-7)
    pub msel: u8,
    /// Termination select
    pub tsel: bool,
    /// Receiver sense
    pub rsen: bool,
    /// Monitor detect interrupt
    pub mdi: bool,
}

impl ControlB {
    /// Parse from raw register value
    pub fn from_register(value: u8) -> Self {
        Self {
            vlow: value & reg9::VLOW != 0,
            msel: (value & reg9::MSEL_MASK) >> reg9::MSEL_SHIFT,
            tsel: value & reg9::TSEL != 0,
            rsen: value & reg9::RSEN != 0,
            mdi: value & reg9::MDI != 0,
        }
    }

    /// Connection state implied by the register
    ///
    /// RSEN clear is reported as connected. This matches the shipping
    /// driver on reference hardware even though the bit is named for the
    /// receiver being sensed.
    pub fn connector_status(&self) -> ConnectorStatus {
        if self.rsen {
            ConnectorStatus::Disconnected
        } else {
            ConnectorStatus::Connected
        }
    }
}

/// Full identification of a chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipId {
    /// 16-bit vendor id
    pub vendor: u16,
    /// 16-bit device id
    pub device: u16,
    /// Silicon revision
    pub revision: u8,
}

/// NS2501 driver state
///
/// Created by [`DvoDriver::init`] once the chip has identified itself.
/// The bus and slave address live in the host's [`DvoHandle`].
#[derive(Debug)]
pub struct Ns2501 {
    config: Ns2501Config,
    quiet: bool,
}

impl Ns2501 {
    /// Identify the chip behind `dvo` with an explicit configuration
    pub fn init_with_config<B: I2cTransfer>(
        dvo: &mut DvoHandle<B>,
        config: Ns2501Config,
    ) -> Result<Self, DvoError> {
        let mut ns = Self {
            config,
            quiet: true,
        };

        ns.check_id(dvo, reg::VID_LO, NS2501_VID as u8)?;
        ns.check_id(dvo, reg::DID_LO, NS2501_DID as u8)?;
        ns.quiet = false;

        debug!("init ns2501 dvo controller successfully");
        Ok(ns)
    }

    /// Get the configuration
    pub fn config(&self) -> &Ns2501Config {
        &self.config
    }

    /// Check if bus diagnostics are suppressed
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Read one register
    pub fn read_reg<B: I2cTransfer>(
        &self,
        dvo: &mut DvoHandle<B>,
        addr: u8,
    ) -> Result<u8, DvoError> {
        let slave = dvo.slave_addr();
        let out = [addr];
        let mut inp = [0u8; 1];

        let result = {
            let mut msgs = [I2cMessage::write(slave, &out), I2cMessage::read(slave, &mut inp)];
            dvo.bus_mut().transfer_all(&mut msgs)
        };

        match result {
            Ok(()) => Ok(inp[0]),
            Err(_) => {
                if !self.quiet {
                    debug!(
                        "Unable to read register {:#04x} from {}:{:#04x}",
                        addr,
                        dvo.bus_name(),
                        slave
                    );
                }
                Err(DvoError::Transport { register: addr })
            }
        }
    }

    /// Write one register
    pub fn write_reg<B: I2cTransfer>(
        &self,
        dvo: &mut DvoHandle<B>,
        addr: u8,
        value: u8,
    ) -> Result<(), DvoError> {
        let slave = dvo.slave_addr();
        let out = [addr, value];
        let mut msgs = [I2cMessage::write(slave, &out)];

        if dvo.bus_mut().transfer_all(&mut msgs).is_ok() {
            return Ok(());
        }

        if !self.quiet {
            debug!(
                "Unable to write register {:#04x} to {}:{:#04x}",
                addr,
                dvo.bus_name(),
                slave
            );
        }
        Err(DvoError::Transport { register: addr })
    }

    /// Read the full vendor id, device id and revision
    pub fn identify<B: I2cTransfer>(&self, dvo: &mut DvoHandle<B>) -> Result<ChipId, DvoError> {
        let vendor = self.read_u16(dvo, reg::VID_LO, reg::VID_HI)?;
        let device = self.read_u16(dvo, reg::DID_LO, reg::DID_HI)?;
        let revision = self.read_reg(dvo, reg::REV)?;
        Ok(ChipId {
            vendor,
            device,
            revision,
        })
    }

    /// Read the 16-bit input frequency counter
    pub fn frequency<B: I2cTransfer>(&self, dvo: &mut DvoHandle<B>) -> Result<u16, DvoError> {
        self.read_u16(dvo, reg::FREQ_LO, reg::FREQ_HI)
    }

    fn read_u16<B: I2cTransfer>(
        &self,
        dvo: &mut DvoHandle<B>,
        lo: u8,
        hi: u8,
    ) -> Result<u16, DvoError> {
        let lo = self.read_reg(dvo, lo)?;
        let hi = self.read_reg(dvo, hi)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn check_id<B: I2cTransfer>(
        &self,
        dvo: &mut DvoHandle<B>,
        register: u8,
        expected: u8,
    ) -> Result<(), DvoError> {
        let found = self.read_reg(dvo, register)?;
        if found != expected {
            return Err(DvoError::NotDetected {
                register,
                expected,
                found,
            });
        }
        Ok(())
    }

    fn program<B: I2cTransfer>(&self, dvo: &mut DvoHandle<B>) -> Result<(), DvoError> {
        for &(addr, value) in PROGRAMMING_SEQUENCE.iter() {
            self.write_reg(dvo, addr, value)?;
        }
        Ok(())
    }
}

impl<B: I2cTransfer> DvoDevice<B> for Ns2501 {
    fn name(&self) -> &'static str {
        "ns2501"
    }

    fn detect(&mut self, dvo: &mut DvoHandle<B>) -> ConnectorStatus {
        match self.read_reg(dvo, reg::REG9) {
            Ok(value) => ControlB::from_register(value).connector_status(),
            Err(_) => ConnectorStatus::Unknown,
        }
    }

    fn mode_valid(&self, _dvo: &DvoHandle<B>, _mode: &DisplayMode) -> ModeStatus {
        ModeStatus::Ok
    }

    fn mode_set(&mut self, dvo: &mut DvoHandle<B>, _mode: &DisplayMode, _adjusted: &DisplayMode) {
        if !self.config.program_on_mode_set {
            return;
        }
        // Failures were already logged by write_reg
        let _ = self.program(dvo);
    }

    fn dpms(&mut self, dvo: &mut DvoHandle<B>, mode: DpmsMode) {
        // Only confirms the chip still answers; PD is left as powered up
        if self.read_reg(dvo, reg::REG8).is_ok() {
            trace!("ns2501 dpms {:?} ignored", mode);
        }
    }

    fn dump_regs(&self, dvo: &mut DvoHandle<B>) {
        for &(addr, label) in DUMP_REGS.iter() {
            match self.read_reg(dvo, addr) {
                Ok(value) => info!("{}: {:#04x}", label, value),
                Err(_) => info!("{}: unreadable", label),
            }
        }
    }
}

impl<B: I2cTransfer> DvoDriver<B> for Ns2501 {
    const NAME: &'static str = "ns2501";

    fn init(dvo: &mut DvoHandle<B>) -> Result<Self, DvoError> {
        Self::init_with_config(dvo, Ns2501Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvolink_core::config::DvoPort;
    use dvolink_hal::{SimAccess, SimBus};
    use proptest::prelude::*;

    const ADDR: u8 = 0x38;

    fn ns2501_bus() -> SimBus {
        SimBus::new(ADDR)
            .with_register(reg::VID_LO, 0x05)
            .with_register(reg::VID_HI, 0x13)
            .with_register(reg::DID_LO, 0x26)
            .with_register(reg::DID_HI, 0x67)
            .with_register(reg::REV, 0x02)
    }

    fn handle(bus: SimBus) -> DvoHandle<SimBus> {
        DvoHandle::new(bus, ADDR, DvoPort::B)
    }

    fn probed() -> (Ns2501, DvoHandle<SimBus>) {
        let mut dvo = handle(ns2501_bus());
        let ns = <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap();
        dvo.bus_mut().clear_log();
        (ns, dvo)
    }

    #[test]
    fn test_init_identifies_chip() {
        let mut dvo = handle(ns2501_bus());
        let ns = <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap();

        assert!(!ns.is_quiet());
        assert!(!ns.config().program_on_mode_set);
        assert_eq!(
            dvo.bus_mut().accesses(),
            &[
                SimAccess::Read { reg: reg::VID_LO },
                SimAccess::Read { reg: reg::DID_LO },
            ]
        );
    }

    #[test]
    fn test_init_rejects_wrong_vendor() {
        let mut dvo = handle(ns2501_bus().with_register(reg::VID_LO, 0x06));

        assert_eq!(
            <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap_err(),
            DvoError::NotDetected {
                register: reg::VID_LO,
                expected: 0x05,
                found: 0x06
            }
        );
        // Device id is not probed after a vendor mismatch
        assert_eq!(dvo.bus_mut().reads().count(), 1);
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut dvo = handle(ns2501_bus().with_register(reg::DID_LO, 0x27));

        assert_eq!(
            <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap_err(),
            DvoError::NotDetected {
                register: reg::DID_LO,
                expected: 0x26,
                found: 0x27
            }
        );
    }

    #[test]
    fn test_init_needs_low_bytes_at_exact_addresses() {
        // Ids swapped between the two registers
        let bus = ns2501_bus()
            .with_register(reg::VID_LO, 0x26)
            .with_register(reg::DID_LO, 0x05);
        let mut dvo = handle(bus);
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).is_err());

        // Only the high bytes match
        let bus = SimBus::new(ADDR)
            .with_register(reg::VID_HI, 0x05)
            .with_register(reg::DID_HI, 0x26);
        let mut dvo = handle(bus);
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).is_err());
    }

    #[test]
    fn test_init_transport_failures() {
        let mut bus = ns2501_bus();
        bus.absent = true;
        let mut dvo = handle(bus);
        assert_eq!(
            <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap_err(),
            DvoError::Transport {
                register: reg::VID_LO
            }
        );

        let mut bus = ns2501_bus();
        bus.fail_read_at = Some(reg::DID_LO);
        let mut dvo = handle(bus);
        assert_eq!(
            <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap_err(),
            DvoError::Transport {
                register: reg::DID_LO
            }
        );

        let mut bus = ns2501_bus();
        bus.bus_error = true;
        let mut dvo = handle(bus);
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo)
            .unwrap_err()
            .is_transport());
    }

    #[test]
    fn test_init_retry_after_failure() {
        let mut bus = ns2501_bus();
        bus.fail_reads = true;
        let mut dvo = handle(bus);
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).is_err());

        dvo.bus_mut().fail_reads = false;
        let ns = <Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).unwrap();
        assert!(!ns.is_quiet());
    }

    #[test]
    fn test_detect_polarity() {
        let (mut ns, mut dvo) = probed();

        dvo.bus_mut().set_register(reg::REG9, 0x00);
        assert_eq!(ns.detect(&mut dvo), ConnectorStatus::Connected);

        dvo.bus_mut().set_register(reg::REG9, reg9::RSEN);
        assert_eq!(ns.detect(&mut dvo), ConnectorStatus::Disconnected);

        assert!(dvo.bus_mut().reads().all(|r| r == reg::REG9));
    }

    #[test]
    fn test_detect_read_failure_is_unknown() {
        let (mut ns, mut dvo) = probed();
        dvo.bus_mut().fail_reads = true;

        assert_eq!(ns.detect(&mut dvo), ConnectorStatus::Unknown);
    }

    #[test]
    fn test_mode_valid_accepts_everything() {
        let (ns, dvo) = probed();

        assert_eq!(ns.mode_valid(&dvo, &DisplayMode::default()), ModeStatus::Ok);
        assert_eq!(ns.mode_valid(&dvo, &DisplayMode::XGA_60), ModeStatus::Ok);

        let absurd = DisplayMode {
            clock_khz: u32::MAX,
            htotal: 1,
            ..DisplayMode::default()
        };
        assert_eq!(ns.mode_valid(&dvo, &absurd), ModeStatus::Ok);
    }

    #[test]
    fn test_mode_set_touches_nothing() {
        let (mut ns, mut dvo) = probed();

        ns.mode_set(&mut dvo, &DisplayMode::XGA_60, &DisplayMode::XGA_60);
        ns.mode_set(&mut dvo, &DisplayMode::default(), &DisplayMode::default());

        assert!(dvo.bus_mut().accesses().is_empty());
    }

    #[test]
    fn test_mode_set_programming_sequence_when_enabled() {
        let mut dvo = handle(ns2501_bus());
        let config = Ns2501Config {
            program_on_mode_set: true,
        };
        let mut ns = Ns2501::init_with_config(&mut dvo, config).unwrap();
        dvo.bus_mut().clear_log();

        ns.mode_set(&mut dvo, &DisplayMode::XGA_60, &DisplayMode::XGA_60);

        let expected = PROGRAMMING_SEQUENCE.map(|(reg, value)| SimAccess::Write { reg, value });
        assert_eq!(dvo.bus_mut().accesses(), &expected);
        assert_eq!(dvo.bus_mut().register(reg::REG8), 0x31);
        assert_eq!(dvo.bus_mut().register(reg::REGC), 0x89);
    }

    #[test]
    fn test_dpms_reads_once_and_never_writes() {
        let (mut ns, mut dvo) = probed();
        dvo.bus_mut().set_register(reg::REG8, reg8::VEN | reg8::HEN | reg8::PD);

        for mode in [DpmsMode::On, DpmsMode::Standby, DpmsMode::Suspend, DpmsMode::Off] {
            dvo.bus_mut().clear_log();
            ns.dpms(&mut dvo, mode);
            assert_eq!(dvo.bus_mut().accesses(), &[SimAccess::Read { reg: reg::REG8 }]);
        }
        assert_eq!(dvo.bus_mut().register(reg::REG8), 0x31);

        dvo.bus_mut().clear_log();
        dvo.bus_mut().fail_reads = true;
        ns.dpms(&mut dvo, DpmsMode::Off);
        assert_eq!(dvo.bus_mut().write_count(), 0);
    }

    #[test]
    fn test_dump_regs_reads_five_registers() {
        let (ns, mut dvo) = probed();

        ns.dump_regs(&mut dvo);

        let expected = [reg::FREQ_LO, reg::FREQ_HI, reg::REG8, reg::REG9, reg::REGC];
        assert!(dvo.bus_mut().reads().eq(expected.iter().copied()));
        assert_eq!(dvo.bus_mut().write_count(), 0);
    }

    #[test]
    fn test_dump_regs_survives_read_failures() {
        let (ns, mut dvo) = probed();

        dvo.bus_mut().fail_read_at = Some(reg::REG8);
        ns.dump_regs(&mut dvo);
        assert_eq!(dvo.bus_mut().reads().count(), 5);

        dvo.bus_mut().clear_log();
        dvo.bus_mut().fail_read_at = None;
        dvo.bus_mut().absent = true;
        ns.dump_regs(&mut dvo);
        assert_eq!(dvo.bus_mut().reads().count(), 5);
    }

    #[test]
    fn test_identify_and_frequency() {
        let (ns, mut dvo) = probed();
        dvo.bus_mut().set_register(reg::FREQ_LO, 0x34);
        dvo.bus_mut().set_register(reg::FREQ_HI, 0x12);

        assert_eq!(
            ns.identify(&mut dvo),
            Ok(ChipId {
                vendor: NS2501_VID,
                device: NS2501_DID,
                revision: 0x02
            })
        );
        assert_eq!(ns.frequency(&mut dvo), Ok(0x1234));
    }

    #[test]
    fn test_write_failure() {
        let (ns, mut dvo) = probed();
        dvo.bus_mut().fail_writes = true;

        assert_eq!(
            ns.write_reg(&mut dvo, reg::REG8, 0x31),
            Err(DvoError::Transport { register: reg::REG8 })
        );
    }

    #[test]
    fn test_control_register_parsing() {
        let a = ControlA::from_register(0x31);
        assert!(a.ven);
        assert!(a.hen);
        assert!(!a.dsel);
        assert!(!a.bpas);
        assert!(a.pd);

        let b = ControlB::from_register(0xD5);
        assert!(b.vlow);
        assert_eq!(b.msel, 0x5);
        assert!(!b.tsel);
        assert!(b.rsen);
        assert!(b.mdi);
    }

    #[cfg(not(feature = "defmt"))]
    #[test]
    fn test_probing_is_quiet() {
        crate::test_log::install();

        let mut bus = ns2501_bus();
        bus.absent = true;
        let mut dvo = handle(bus);
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).is_err());

        let mut dvo = handle(ns2501_bus().with_register(reg::DID_LO, 0x00));
        assert!(<Ns2501 as DvoDriver<SimBus>>::init(&mut dvo).is_err());

        assert!(crate::test_log::take().is_empty());
    }

    #[cfg(not(feature = "defmt"))]
    #[test]
    fn test_failures_reported_after_probe() {
        crate::test_log::install();
        let (ns, mut dvo) = probed();
        crate::test_log::take();

        dvo.bus_mut().fail_reads = true;
        assert!(ns.read_reg(&mut dvo, reg::REG9).is_err());

        let records = crate::test_log::take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, log::Level::Debug);
        assert_eq!(records[0].1, "Unable to read register 0x09 from sim:0x38");
    }

    #[cfg(not(feature = "defmt"))]
    #[test]
    fn test_write_failure_reporting() {
        crate::test_log::install();
        let (ns, mut dvo) = probed();
        crate::test_log::take();

        dvo.bus_mut().fail_writes = true;
        assert!(ns.write_reg(&mut dvo, reg::REG8, 0x31).is_err());

        let records = crate::test_log::take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, log::Level::Debug);
        assert_eq!(records[0].1, "Unable to write register 0x08 to sim:0x38");

        let quiet = Ns2501 {
            config: Ns2501Config::default(),
            quiet: true,
        };
        assert_eq!(
            quiet.write_reg(&mut dvo, reg::REG8, 0x31),
            Err(DvoError::Transport { register: reg::REG8 })
        );
        assert!(crate::test_log::take().is_empty());
    }

    #[cfg(not(feature = "defmt"))]
    #[test]
    fn test_dump_regs_output() {
        crate::test_log::install();
        let (ns, mut dvo) = probed();
        dvo.bus_mut().set_register(reg::REG9, 0x04);
        dvo.bus_mut().fail_read_at = Some(reg::REGC);
        crate::test_log::take();

        ns.dump_regs(&mut dvo);

        let lines: Vec<String> = crate::test_log::take()
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Info)
            .map(|(_, line)| line)
            .collect();
        assert_eq!(
            lines,
            [
                "NS2501_FREQ_LO: 0x00",
                "NS2501_FREQ_HI: 0x00",
                "NS2501_REG8: 0x00",
                "NS2501_REG9: 0x04",
                "NS2501_REGC: unreadable",
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_write_read_roundtrip(addr in any::<u8>(), value in any::<u8>()) {
            let (ns, mut dvo) = probed();

            ns.write_reg(&mut dvo, addr, value).unwrap();
            prop_assert_eq!(ns.read_reg(&mut dvo, addr), Ok(value));
        }

        #[test]
        fn prop_detect_depends_only_on_rsen(value in any::<u8>()) {
            let (mut ns, mut dvo) = probed();
            dvo.bus_mut().set_register(reg::REG9, value);

            let expected = if value & reg9::RSEN == 0 {
                ConnectorStatus::Connected
            } else {
                ConnectorStatus::Disconnected
            };
            prop_assert_eq!(ns.detect(&mut dvo), expected);
        }
    }
}
