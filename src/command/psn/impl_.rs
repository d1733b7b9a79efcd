use super::types::PdpType;
use atat::AtatLen;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

impl AtatLen for PdpType {
    // Quoted "IPV4V6"
    const LEN: usize = 8;
}

impl Serialize for PdpType {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_str() {
            Some(s) => Serializer::serialize_str(serializer, s),
            None => Err(serde::ser::Error::custom("unknown PDP type")),
        }
    }
}

impl<'de> Deserialize<'de> for PdpType {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = PdpType;
            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Formatter::write_str(formatter, "PDP type string")
            }

            fn visit_bytes<E>(self, value: &[u8]) -> core::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match value {
                    b"IP" => PdpType::Ip,
                    b"IPV6" => PdpType::Ipv6,
                    b"IPV4V6" => PdpType::Ipv4v6,
                    b"Non-IP" => PdpType::NonIp,
                    _ => PdpType::Unknown,
                })
            }

            fn visit_str<E>(self, value: &str) -> core::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_bytes(value.as_bytes())
            }
        }

        Deserializer::deserialize_str(deserializer, Visitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use atat::atat_derive::AtatResp;
    use atat::serde_at::de::from_str;
    use atat::serde_at::ser::to_slice;

    #[derive(Debug, PartialEq, AtatResp)]
    struct Context {
        #[at_arg(position = 0)]
        cid: u8,
        #[at_arg(position = 1)]
        pdp_type: PdpType,
    }

    #[test]
    fn serialize_pdp_type() {
        let options = atat::serde_at::SerializeOptions {
            value_sep: false,
            ..atat::serde_at::SerializeOptions::default()
        };
        let mut buf = [0u8; 16];
        let s = to_slice(&PdpType::Ipv4v6, "", &mut buf, options).unwrap();
        assert_eq!(&buf[..s], b"\"IPV4V6\"");
    }

    #[test]
    fn deserialize_pdp_type() {
        assert_eq!(
            from_str("+CGDCONT: 1,\"Non-IP\""),
            Ok(Context {
                cid: 1,
                pdp_type: PdpType::NonIp
            })
        );
        assert_eq!(
            from_str("+CGDCONT: 2,\"PPP\""),
            Ok(Context {
                cid: 2,
                pdp_type: PdpType::Unknown
            })
        );
    }
}
