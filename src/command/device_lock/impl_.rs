use super::types::PinStatusCode;
use serde::{de, Deserialize, Deserializer};

impl<'de> Deserialize<'de> for PinStatusCode {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        enum Field {
            Ready,
            SimPin,
            SimPuk,
            PhSimPin,
            PhSimPuk,
            PhNetPin,
            SimPin2,
            SimPuk2,
            Unknown,
        }
        struct FieldVisitor;

        impl<'de> de::Visitor<'de> for FieldVisitor {
            type Value = Field;
            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Formatter::write_str(formatter, "variant identifier")
            }

            // Both the underscore and the hyphen spelling of the phone lock
            // codes are in use.
            fn visit_bytes<E>(self, value: &[u8]) -> core::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match value {
                    b"READY" => Field::Ready,
                    b"SIM PIN" => Field::SimPin,
                    b"SIM PUK" => Field::SimPuk,
                    b"PH_SIM PIN" | b"PH-SIM PIN" => Field::PhSimPin,
                    b"PH_SIM PUK" | b"PH-SIM PUK" => Field::PhSimPuk,
                    b"PH_NET PIN" | b"PH-NET PIN" => Field::PhNetPin,
                    b"SIM PIN2" => Field::SimPin2,
                    b"SIM PUK2" => Field::SimPuk2,
                    _ => Field::Unknown,
                })
            }

            fn visit_str<E>(self, value: &str) -> core::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_bytes(value.as_bytes())
            }
        }

        impl<'de> Deserialize<'de> for Field {
            #[inline]
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserializer::deserialize_identifier(deserializer, FieldVisitor)
            }
        }
        struct Visitor<'de> {
            marker: core::marker::PhantomData<PinStatusCode>,
            lifetime: core::marker::PhantomData<&'de ()>,
        }
        impl<'de> de::Visitor<'de> for Visitor<'de> {
            type Value = PinStatusCode;
            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Formatter::write_str(formatter, "enum PinStatusCode")
            }

            fn visit_enum<A>(self, data: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: de::EnumAccess<'de>,
            {
                Ok(match de::EnumAccess::variant(data)? {
                    (Field::Ready, _) => PinStatusCode::Ready,
                    (Field::SimPin, _) => PinStatusCode::SimPin,
                    (Field::SimPuk, _) => PinStatusCode::SimPuk,
                    (Field::PhSimPin, _) => PinStatusCode::PhSimPin,
                    (Field::PhSimPuk, _) => PinStatusCode::PhSimPuk,
                    (Field::PhNetPin, _) => PinStatusCode::PhNetPin,
                    (Field::SimPin2, _) => PinStatusCode::SimPin2,
                    (Field::SimPuk2, _) => PinStatusCode::SimPuk2,
                    (Field::Unknown, _) => PinStatusCode::Unknown,
                })
            }
        }
        const VARIANTS: &[&str] = &[
            "Ready", "SimPin", "SimPuk", "PhSimPin", "PhSimPuk", "PhNetPin", "SimPin2", "SimPuk2",
            "Unknown",
        ];
        Deserializer::deserialize_enum(
            deserializer,
            "PinStatusCode",
            VARIANTS,
            Visitor {
                marker: core::marker::PhantomData::<Self>,
                lifetime: core::marker::PhantomData,
            },
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use atat::atat_derive::AtatResp;
    use atat::serde_at::de::from_str;

    #[derive(Debug, PartialEq, AtatResp)]
    struct Code {
        #[at_arg(position = 0)]
        code: PinStatusCode,
    }

    #[test]
    fn deserialize_pin_status() {
        assert_eq!(
            from_str("+CPIN: READY\r\n"),
            Ok(Code {
                code: PinStatusCode::Ready
            })
        );
        assert_eq!(
            from_str("+CPIN: PH-NET PIN\r\n"),
            Ok(Code {
                code: PinStatusCode::PhNetPin
            })
        );
        assert_eq!(
            from_str("+CPIN: PH_NET PIN\r\n"),
            Ok(Code {
                code: PinStatusCode::PhNetPin
            })
        );
        assert_eq!(
            from_str("+CPIN: NOT INSERTED\r\n"),
            Ok(Code {
                code: PinStatusCode::Unknown
            })
        );
    }
}
