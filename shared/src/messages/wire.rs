// Relay frame layout:
//
//   sync payload:           [TAG_SYNC_PAYLOAD] [critical: 0|1] [blob ...]
//   identity announcement:  [TAG_IDENTITY_ANNOUNCEMENT] "SessionID:" [utf-8 id ...]
//
// The blob is opaque and forwarded byte for byte.

use log::warn;

use crate::{RelayMessage, SessionId, WireError};

pub const TAG_SYNC_PAYLOAD: u8 = 0x00;
pub const TAG_IDENTITY_ANNOUNCEMENT: u8 = 0x01;
pub const SESSION_ID_PREFIX: &str = "SessionID:";

impl RelayMessage {
    /// Frame this message for the transport
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            RelayMessage::SyncPayload { bytes, critical } => {
                let mut output = Vec::with_capacity(bytes.len() + 2);
                output.push(TAG_SYNC_PAYLOAD);
                output.push(u8::from(*critical));
                output.extend_from_slice(bytes);
                output
            }
            RelayMessage::IdentityAnnouncement(session_id) => {
                let id = session_id.as_str().as_bytes();
                let mut output = Vec::with_capacity(1 + SESSION_ID_PREFIX.len() + id.len());
                output.push(TAG_IDENTITY_ANNOUNCEMENT);
                output.extend_from_slice(SESSION_ID_PREFIX.as_bytes());
                output.extend_from_slice(id);
                output
            }
        }
    }

    /// Read a frame received from a peer.
    ///
    /// SECURITY: input is untrusted. Every malformed frame yields an error,
    /// never a panic.
    pub fn from_bytes(frame: &[u8]) -> Result<Self, WireError> {
        let Some((tag, body)) = frame.split_first() else {
            return Err(WireError::EmptyFrame);
        };

        match *tag {
            TAG_SYNC_PAYLOAD => {
                let Some((flag, blob)) = body.split_first() else {
                    return Err(WireError::Truncated {
                        field: "criticality flag",
                    });
                };
                let critical = match *flag {
                    0 => false,
                    1 => true,
                    flag => return Err(WireError::InvalidCriticality { flag }),
                };
                Ok(RelayMessage::SyncPayload {
                    bytes: blob.to_vec(),
                    critical,
                })
            }
            TAG_IDENTITY_ANNOUNCEMENT => {
                let Some(id_bytes) = body.strip_prefix(SESSION_ID_PREFIX.as_bytes()) else {
                    return Err(WireError::MissingPrefix);
                };
                let Ok(id) = std::str::from_utf8(id_bytes) else {
                    return Err(WireError::InvalidUtf8);
                };
                if id.is_empty() {
                    return Err(WireError::EmptySessionId);
                }
                Ok(RelayMessage::IdentityAnnouncement(SessionId::new(id)))
            }
            tag => {
                warn!("dropping relay frame with unknown tag {:#04x}", tag);
                Err(WireError::UnknownTag { tag })
            }
        }
    }
}
