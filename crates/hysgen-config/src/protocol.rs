//! Protocol selector
//!
//! Maps the transport menu to the Hysteria protocol identifier. Each menu
//! index maps to its own variant.

use crate::error::PromptError;
use crate::prompt::Prompter;
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};

/// Hysteria transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Protocol {
    #[serde(rename = "udp")]
    Udp,
    #[serde(rename = "wechat-video")]
    WechatVideo,
    #[serde(rename = "faketcp")]
    FakeTcp,
}

impl Protocol {
    /// Wire identifier used in config files and the share URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "udp",
            Protocol::WechatVideo => "wechat-video",
            Protocol::FakeTcp => "faketcp",
        }
    }

    /// Menu labels, in menu order.
    pub fn menu() -> [&'static str; 3] {
        [
            "UDP (supports range port hopping, press Enter to default)",
            "Wechat-Video",
            "FakeTcp (linux/Android clients only, requires root privileges)",
        ]
    }

    fn from_menu_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Protocol::Udp),
            1 => Some(Protocol::WechatVideo),
            2 => Some(Protocol::FakeTcp),
            _ => None,
        }
    }

    /// Run the transport menu.
    pub fn select<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
    ) -> Result<Self, PromptError> {
        let index = prompter.choose("Select transport protocol for hysteria:", &Self::menu())?;

        // choose() only returns indices inside the menu.
        Ok(Self::from_menu_index(index).unwrap_or(Protocol::Udp))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
