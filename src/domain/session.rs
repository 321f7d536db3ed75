//! Wallet session identity.

use alloy::primitives::Address;

/// The connected account, if any.
///
/// At most one session exists per client. It is created by a
/// successful connect and cleared when the wallet reports no accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub connected_address: Option<Address>,
}

impl Session {
    pub const fn connected(address: Address) -> Self {
        Self {
            connected_address: Some(address),
        }
    }

    pub const fn is_connected(&self) -> bool {
        self.connected_address.is_some()
    }

    /// Label shown on the connect control: `Connected: 0x1234...abcd`.
    pub fn label(&self) -> String {
        match self.connected_address {
            Some(addr) => format!("Connected: {}", short_address(&addr)),
            None => "Connect Wallet".to_string(),
        }
    }
}

/// First six and last four characters of the checksummed address.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
