// Command endpoints and operation verbs understood by the device API.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A command endpoint, i.e. the last URL segment a request is POSTed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    Retrieve,
    Reset,
    Image,
    Show,
    Generate,
    Configure,
    ConfigFile,
    Reboot,
    Poweroff,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Operation verb carried in the `op` field of each request object.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Op {
    ShowConfig,
    ReturnValues,
    Exists,
    Reset,
    Add,
    Delete,
    Show,
    Generate,
    Set,
    Save,
    Load,
    Reboot,
    Poweroff,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
