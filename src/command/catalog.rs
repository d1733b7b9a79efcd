//! Static command descriptors.
//!
//! One descriptor per supported command, holding the wire string of every
//! variant the module accepts together with the documented response format.
//! The response strings are informational only.

use super::{Command, CommandType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VariantRecord {
    /// Wire command without arguments or line terminator
    pub command: &'static str,
    /// Documented response format
    pub response: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub test: Option<VariantRecord>,
    pub read: Option<VariantRecord>,
    pub write: Option<VariantRecord>,
    pub execute: Option<VariantRecord>,
}

/// The requested variant is not supported by the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoSuchVariant;

impl CommandDescriptor {
    pub fn variant(&self, ty: CommandType) -> Result<&VariantRecord, NoSuchVariant> {
        let variant = match ty {
            CommandType::Test => self.test.as_ref(),
            CommandType::Read => self.read.as_ref(),
            CommandType::Write => self.write.as_ref(),
            CommandType::Execute => self.execute.as_ref(),
        };
        variant
            .filter(|v| !v.command.is_empty())
            .ok_or(NoSuchVariant)
    }

    pub fn supports(&self, ty: CommandType) -> bool {
        self.variant(ty).is_ok()
    }
}

macro_rules! test_variant {
    ($cmd:literal, $resp:literal) => {
        Some(VariantRecord {
            command: concat!($cmd, "=?"),
            response: $resp,
        })
    };
}

macro_rules! read_variant {
    ($cmd:literal, $resp:literal) => {
        Some(VariantRecord {
            command: concat!($cmd, "?"),
            response: $resp,
        })
    };
}

macro_rules! write_variant {
    ($cmd:literal, $resp:literal) => {
        Some(VariantRecord {
            command: concat!($cmd, "="),
            response: $resp,
        })
    };
}

macro_rules! execute_variant {
    ($cmd:literal, $resp:literal) => {
        Some(VariantRecord {
            command: $cmd,
            response: $resp,
        })
    };
}

pub fn descriptor(command: Command) -> &'static CommandDescriptor {
    match command {
        Command::At => &AT,
        Command::Cpin => &CPIN,
        Command::Cfun => &CFUN,
        Command::Csq => &CSQ,
        Command::Ate => &ATE,
        Command::Cmee => &CMEE,
        Command::Cgdcont => &CGDCONT,
        Command::Cgatt => &CGATT,
        Command::Cops => &COPS,
        Command::Cgnapn => &CGNAPN,
        Command::Cncfg => &CNCFG,
        Command::Cnact => &CNACT,
        Command::Smconf => &SMCONF,
        Command::Smconn => &SMCONN,
        Command::Smpub => &SMPUB,
        Command::Smstate => &SMSTATE,
        Command::Cereg => &CEREG,
        Command::Smdisc => &SMDISC,
    }
}

/// Recognise an encoded command line.
///
/// Test and read variants match exactly. A write variant needs arguments after
/// its `=`. An execute variant may only carry a trailing number (`ATE0`).
pub fn identify(line: &str) -> Option<(Command, CommandType, Option<&str>)> {
    let line = line.trim_end_matches(['\r', '\n']);

    for command in Command::ALL {
        let descriptor = descriptor(command);
        for ty in [
            CommandType::Test,
            CommandType::Read,
            CommandType::Write,
            CommandType::Execute,
        ] {
            let Some(rest) = descriptor
                .variant(ty)
                .ok()
                .and_then(|v| line.strip_prefix(v.command))
            else {
                continue;
            };
            match ty {
                CommandType::Test | CommandType::Read if rest.is_empty() => {
                    return Some((command, ty, None))
                }
                CommandType::Write if !rest.is_empty() => return Some((command, ty, Some(rest))),
                CommandType::Execute if rest.bytes().all(|b| b.is_ascii_digit()) => {
                    return Some((command, ty, (!rest.is_empty()).then_some(rest)))
                }
                _ => {}
            }
        }
    }
    None
}

/// `AT` behaves like an execute command: the wire string is the name itself.
pub static AT: CommandDescriptor = CommandDescriptor {
    name: "AT",
    description: "Test AT Command - Test communication with device",
    test: None,
    read: None,
    write: None,
    execute: execute_variant!("AT", "OK"),
};

pub static CPIN: CommandDescriptor = CommandDescriptor {
    name: "AT+CPIN",
    description: "Enter PIN - Controls SIM card PIN operations",
    test: test_variant!("AT+CPIN", "OK"),
    read: read_variant!("AT+CPIN", "+CPIN: <code>"),
    write: write_variant!("AT+CPIN", "OK"),
    execute: None,
};

pub static CFUN: CommandDescriptor = CommandDescriptor {
    name: "AT+CFUN",
    description: "Set Phone Functionality - Set phone functionality to minimum, full, or disable",
    test: test_variant!("AT+CFUN", "+CFUN: (0,1,4-7),(0,1)"),
    read: read_variant!("AT+CFUN", "+CFUN: <fun>"),
    write: write_variant!("AT+CFUN", "OK"),
    execute: None,
};

pub static CSQ: CommandDescriptor = CommandDescriptor {
    name: "AT+CSQ",
    description: "Signal Quality Report - Get current signal strength (RSSI) and bit error rate (BER)",
    test: test_variant!("AT+CSQ", "+CSQ: (0-31,99),(0-7,99)"),
    read: None,
    write: None,
    execute: execute_variant!("AT+CSQ", "+CSQ: <rssi>,<ber>"),
};

/// Echo mode is selected by appending the mode to the execute string, `ATE0`.
pub static ATE: CommandDescriptor = CommandDescriptor {
    name: "ATE",
    description: "Set Command Echo Mode - Controls whether device echoes back commands",
    test: None,
    read: None,
    write: None,
    execute: execute_variant!("ATE", "OK"),
};

pub static CMEE: CommandDescriptor = CommandDescriptor {
    name: "AT+CMEE",
    description: "Report Mobile Equipment Error - Enable numeric or verbose error codes",
    test: test_variant!("AT+CMEE", "+CMEE: (0-2)"),
    read: read_variant!("AT+CMEE", "+CMEE: <n>"),
    write: write_variant!("AT+CMEE", "OK"),
    execute: None,
};

pub static CGDCONT: CommandDescriptor = CommandDescriptor {
    name: "AT+CGDCONT",
    description: "Define PDP Context - Set PDP context parameters including Context ID, Type, and APN",
    test: test_variant!("AT+CGDCONT", "+CGDCONT: (1-15),\"IP\",,,(0-2),(0-4),(0)"),
    read: read_variant!(
        "AT+CGDCONT",
        "+CGDCONT: <cid>,<PDP_type>,<APN>,<PDP_addr>,<d_comp>,<h_comp>[,...]"
    ),
    write: write_variant!("AT+CGDCONT", "OK"),
    execute: None,
};

pub static CGATT: CommandDescriptor = CommandDescriptor {
    name: "AT+CGATT",
    description: "GPRS Service Attach/Detach - Control device attachment to GPRS service",
    test: test_variant!("AT+CGATT", "+CGATT: (0,1)"),
    read: read_variant!("AT+CGATT", "+CGATT: <state>"),
    write: write_variant!("AT+CGATT", "OK"),
    execute: None,
};

pub static COPS: CommandDescriptor = CommandDescriptor {
    name: "AT+COPS",
    description: "Operator Selection - Get current network operator information",
    test: test_variant!(
        "AT+COPS",
        "+COPS: (list of supported<stat>,long alphanumeric<oper>)"
    ),
    read: read_variant!("AT+COPS", "+COPS: <mode>[,<format>,<oper>[,<AcT>]]"),
    write: write_variant!("AT+COPS", "OK"),
    execute: None,
};

pub static CGNAPN: CommandDescriptor = CommandDescriptor {
    name: "AT+CGNAPN",
    description: "Get Network APN - Retrieve network-provided APN in CAT-M or NB-IOT mode",
    test: test_variant!("AT+CGNAPN", "+CGNAPN: (0,1),120"),
    read: None,
    write: None,
    execute: execute_variant!("AT+CGNAPN", "+CGNAPN: <valid>,<Network_APN>"),
};

pub static CNCFG: CommandDescriptor = CommandDescriptor {
    name: "AT+CNCFG",
    description: "PDP Configure - Configure PDP context parameters",
    test: test_variant!("AT+CNCFG", "+CNCFG: (0-3),(0-4),150,127,127,(0-3)"),
    read: read_variant!(
        "AT+CNCFG",
        "+CNCFG: <pdpidx>,<ip_type>,<APN>,<username>,<password>,<authentication>"
    ),
    write: write_variant!("AT+CNCFG", "OK"),
    execute: None,
};

pub static CNACT: CommandDescriptor = CommandDescriptor {
    name: "AT+CNACT",
    description: "APP Network Active - Control PDP context activation",
    test: test_variant!("AT+CNACT", "+CNACT: (0-3),(0-2)"),
    read: read_variant!("AT+CNACT", "+CNACT: <pdpidx>,<statusx>,<addressx>"),
    write: write_variant!("AT+CNACT", "OK"),
    execute: None,
};

pub static SMCONF: CommandDescriptor = CommandDescriptor {
    name: "AT+SMCONF",
    description: "MQTT Configuration - Set MQTT parameters including broker URL, credentials, and session options",
    test: test_variant!("AT+SMCONF", "OK"),
    read: read_variant!("AT+SMCONF", "+SMCONF: followed by one <TAG>: <value> line per parameter"),
    write: write_variant!("AT+SMCONF", "OK"),
    execute: None,
};

pub static SMCONN: CommandDescriptor = CommandDescriptor {
    name: "AT+SMCONN",
    description: "MQTT Connect - Establish connection to configured MQTT broker",
    test: None,
    read: None,
    write: None,
    execute: execute_variant!("AT+SMCONN", "OK"),
};

/// The write phase ends on the `>` prompt, not on `OK`.
pub static SMPUB: CommandDescriptor = CommandDescriptor {
    name: "AT+SMPUB",
    description: "MQTT Publish - Publish message to specified topic with QoS and retain settings",
    test: test_variant!("AT+SMPUB", "+SMPUB: 128,(0-1024),(0-2),(0-1)"),
    read: None,
    write: write_variant!("AT+SMPUB", ">"),
    execute: None,
};

pub static SMSTATE: CommandDescriptor = CommandDescriptor {
    name: "AT+SMSTATE",
    description: "MQTT State Check - Query current MQTT connection status",
    test: test_variant!("AT+SMSTATE", "+SMSTATE: (0-2)"),
    read: read_variant!("AT+SMSTATE", "+SMSTATE: <status>"),
    write: None,
    execute: None,
};

pub static CEREG: CommandDescriptor = CommandDescriptor {
    name: "AT+CEREG",
    description: "EPS Network Registration Status",
    test: test_variant!("AT+CEREG", "+CEREG: (0-2,4)"),
    read: read_variant!(
        "AT+CEREG",
        "+CEREG: <n>,<stat>[,[<tac>],[<rac>],[<ci>],[<AcT>][,[<cause_type>],[<reject_cause>][,[<Active-Time>],[<Periodic-TAU>]]]]"
    ),
    write: write_variant!("AT+CEREG", "OK"),
    execute: None,
};

pub static SMDISC: CommandDescriptor = CommandDescriptor {
    name: "AT+SMDISC",
    description: "MQTT Disconnect - Terminate the MQTT broker connection",
    test: None,
    read: None,
    write: None,
    execute: execute_variant!("AT+SMDISC", "OK"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::format_command;
    use crate::error::Error;

    /// A canonical argument string for every write variant.
    fn canonical_args(command: Command) -> &'static str {
        match command {
            Command::Cpin => "\"1234\"",
            Command::Cfun => "1",
            Command::Cmee => "2",
            Command::Cgdcont => "1,\"IP\",\"iot.example\"",
            Command::Cgatt => "1",
            Command::Cops => "0",
            Command::Cncfg => "0,1,\"iot.example\",\"\",\"\",0",
            Command::Cnact => "0,1",
            Command::Smconf => "\"KEEPTIME\",60",
            Command::Smpub => "\"topic\",5,0,0",
            Command::Cereg => "2",
            _ => "",
        }
    }

    #[test]
    fn variant_strings() {
        assert_eq!(CSQ.variant(CommandType::Execute).unwrap().command, "AT+CSQ");
        assert_eq!(CSQ.variant(CommandType::Test).unwrap().command, "AT+CSQ=?");
        assert_eq!(CPIN.variant(CommandType::Read).unwrap().command, "AT+CPIN?");
        assert_eq!(CFUN.variant(CommandType::Write).unwrap().command, "AT+CFUN=");
        assert_eq!(CSQ.variant(CommandType::Read), Err(NoSuchVariant));
        assert!(!SMCONN.supports(CommandType::Write));
    }

    #[test]
    fn write_without_args_is_rejected() {
        for command in Command::ALL {
            if command.descriptor().supports(CommandType::Write) {
                assert_eq!(
                    format_command(command, CommandType::Write, None),
                    Err(Error::InvalidArgument),
                    "{}",
                    command.name()
                );
            }
        }
    }

    #[test]
    fn write_acknowledgement_parses() {
        for command in Command::ALL {
            if !command.descriptor().supports(CommandType::Write) {
                continue;
            }
            let args = canonical_args(command);
            assert!(
                format_command(command, CommandType::Write, Some(args)).is_ok(),
                "{}",
                command.name()
            );
            assert!(
                command
                    .parse("\r\nOK\r\n", CommandType::Write, Some(args))
                    .is_ok(),
                "{}",
                command.name()
            );
        }
    }

    #[test]
    fn identify_lines() {
        assert_eq!(
            identify("AT+CPIN?\r\n"),
            Some((Command::Cpin, CommandType::Read, None))
        );
        assert_eq!(
            identify("AT+CSQ=?\r\n"),
            Some((Command::Csq, CommandType::Test, None))
        );
        assert_eq!(
            identify("AT+CFUN=1,1\r\n"),
            Some((Command::Cfun, CommandType::Write, Some("1,1")))
        );
        assert_eq!(
            identify("ATE0\r\n"),
            Some((Command::Ate, CommandType::Execute, Some("0")))
        );
        assert_eq!(identify("AT\r\n"), Some((Command::At, CommandType::Execute, None)));
        assert_eq!(
            identify("AT+SMCONN\r\n"),
            Some((Command::Smconn, CommandType::Execute, None))
        );
        assert_eq!(identify("AT+CFUN=\r\n"), None);
        assert_eq!(identify("AT+CSQ?\r\n"), None);
        assert_eq!(identify("AT+CGREG?\r\n"), None);
    }

    #[test]
    fn identify_every_variant() {
        for command in Command::ALL {
            for ty in [
                CommandType::Test,
                CommandType::Read,
                CommandType::Write,
                CommandType::Execute,
            ] {
                if !command.descriptor().supports(ty) {
                    continue;
                }
                let args = match ty {
                    CommandType::Write => Some(canonical_args(command)),
                    _ => None,
                };
                let line = format_command(command, ty, args).unwrap();
                assert_eq!(
                    identify(&line),
                    Some((command, ty, args)),
                    "{}",
                    line.as_str()
                );
            }
        }
    }
}
