// crates/powerlink-rs-xdc/src/error.rs

use alloc::fmt;
use alloc::string::String;
use hex::FromHexError;
use powerlink_rs_config::ConfigError;
use quick_xml::errors::serialize::DeError;
use quick_xml::errors::serialize::SeError;

/// Failures while importing a device description or exporting a node.
#[derive(Debug)]
pub enum XdcError {
    /// The document is not well-formed or does not fit the profile model.
    XmlParsing(DeError),

    /// The node could not be written back as XML.
    XmlSerializing(SeError),

    /// An octet-string value that is not valid hex.
    HexParsing(FromHexError),

    /// Writing the XML prolog into the output buffer failed.
    FmtError(fmt::Error),

    /// The named element is required but absent.
    MissingElement { element: &'static str },

    /// An `index`, `subIndex` or `dataType` attribute that is not hex.
    InvalidAttributeFormat {
        attribute: &'static str,
        value: String,
    },

    /// The node model refused an object or the node itself.
    Config(ConfigError),
}

impl From<DeError> for XdcError {
    fn from(e: DeError) -> Self {
        XdcError::XmlParsing(e)
    }
}

impl From<SeError> for XdcError {
    fn from(e: SeError) -> Self {
        XdcError::XmlSerializing(e)
    }
}

impl From<FromHexError> for XdcError {
    fn from(e: FromHexError) -> Self {
        XdcError::HexParsing(e)
    }
}

impl From<fmt::Error> for XdcError {
    fn from(e: fmt::Error) -> Self {
        XdcError::FmtError(e)
    }
}

impl From<ConfigError> for XdcError {
    fn from(e: ConfigError) -> Self {
        XdcError::Config(e)
    }
}

impl fmt::Display for XdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XdcError::XmlParsing(e) => write!(f, "cannot read device description: {}", e),
            XdcError::XmlSerializing(e) => write!(f, "cannot write device description: {}", e),
            XdcError::HexParsing(e) => write!(f, "octet string is not hex: {}", e),
            XdcError::FmtError(e) => write!(f, "output buffer error: {}", e),
            XdcError::MissingElement { element } => {
                write!(f, "element <{}> is missing", element)
            }
            XdcError::InvalidAttributeFormat { attribute, value } => {
                write!(f, "attribute {} has malformed value '{}'", attribute, value)
            }
            XdcError::Config(e) => write!(f, "rejected by node model: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::XdcError;
    use alloc::string::ToString;
    use powerlink_rs_config::ConfigError;

    #[test]
    fn test_from_de_error() {
        let xml_err = quick_xml::de::from_str::<crate::model::Iso15745ProfileContainer>(
            "<ISO15745ProfileContainer><",
        )
        .unwrap_err();
        let xdc_err: XdcError = xml_err.into();
        assert!(matches!(xdc_err, XdcError::XmlParsing(_)));
    }

    #[test]
    fn test_from_se_error() {
        let xml_err = quick_xml::errors::serialize::SeError::Custom("test error".to_string());
        let xdc_err: XdcError = xml_err.into();
        assert!(matches!(xdc_err, XdcError::XmlSerializing(_)));
    }

    #[test]
    fn test_from_hex_error() {
        let hex_err = hex::decode("Z").unwrap_err();
        let xdc_err: XdcError = hex_err.into();
        assert!(matches!(xdc_err, XdcError::HexParsing(_)));
    }

    #[test]
    fn test_from_config_error() {
        let xdc_err: XdcError = ConfigError::IndexAlreadyExists(0x1000).into();
        assert!(matches!(
            xdc_err,
            XdcError::Config(ConfigError::IndexAlreadyExists(0x1000))
        ));
        assert!(xdc_err.to_string().starts_with("rejected by node model: "));
    }
}
