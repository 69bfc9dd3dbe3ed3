//! SOME/IP wire format
//!
//! Packet format: 16-byte big-endian header immediately followed by the
//! payload:
//!
//! ```text
//! ┌────────────────┬────────────────┬────────────────────────────────┐
//! │ service_id u16 │ method_id u16  │ length u32                     │
//! ├────────────────┴────────────────┼────────────────────────────────┤
//! │ request_id u32                  │ proto u8 │ iface u8 │ type u8  │
//! │                                 │          │          │ ret u8   │
//! ├─────────────────────────────────┴──────────┴──────────┴──────────┤
//! │ payload (N bytes, ASCII record terminated by a newline)          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `length` counts everything after its own field: the remaining 8 header
//! bytes plus the payload. It is recomputed from the payload on every
//! encode, never hard-coded.

use crate::error::{Error, Result};

/// Total header size in bytes
pub const HEADER_LEN: usize = 16;

/// Header bytes after the length field that the length field counts
pub const LENGTH_COVERED_HEADER: u32 = 8;

// ===== Header Byte Offsets =====

/// Service identifier offset (2 bytes, big-endian)
pub const OFFSET_SERVICE_ID: usize = 0;
/// Method identifier offset (2 bytes, big-endian)
pub const OFFSET_METHOD_ID: usize = 2;
/// Length field offset (4 bytes, big-endian)
pub const OFFSET_LENGTH: usize = 4;
/// Request/correlation id offset (4 bytes, big-endian)
pub const OFFSET_REQUEST_ID: usize = 8;
/// Protocol version byte offset
pub const OFFSET_PROTOCOL_VERSION: usize = 12;
/// Interface version byte offset
pub const OFFSET_INTERFACE_VERSION: usize = 13;
/// Message type byte offset
pub const OFFSET_MESSAGE_TYPE: usize = 14;
/// Return code byte offset
pub const OFFSET_RETURN_CODE: usize = 15;

/// SOME/IP message types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Request expecting a response
    Request = 0x00,
    /// Fire-and-forget request
    RequestNoReturn = 0x01,
    /// Event notification
    Notification = 0x02,
    /// Response to a request
    Response = 0x80,
    /// Error response
    Error = 0x81,
}

impl MessageType {
    /// Map a raw header byte to a known message type
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(MessageType::Request),
            0x01 => Some(MessageType::RequestNoReturn),
            0x02 => Some(MessageType::Notification),
            0x80 => Some(MessageType::Response),
            0x81 => Some(MessageType::Error),
            _ => None,
        }
    }
}

/// A frame to put on the wire
///
/// The probe builds exactly one of these at startup (the fixed request) and
/// reuses the encoded bytes for every send. Any message type can be framed;
/// the loopback tests frame responses with it as well.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Service identifier
    pub service_id: u16,
    /// Method identifier
    pub method_id: u16,
    /// Correlation id, constant for the session
    pub request_id: u32,
    /// Protocol framing version
    pub protocol_version: u8,
    /// Service interface version
    pub interface_version: u8,
    /// Message type on the wire
    pub message_type: MessageType,
    /// Return code, zero on outbound requests
    pub return_code: u8,
    /// Opaque payload bytes
    pub payload: Vec<u8>,
}

impl Frame {
    /// Encode into header plus payload bytes
    ///
    /// The length field is recomputed from the current payload so the frame
    /// stays self-consistent whatever the payload is.
    pub fn encode(&self) -> Vec<u8> {
        let length = LENGTH_COVERED_HEADER + self.payload.len() as u32;

        let mut packet = Vec::with_capacity(HEADER_LEN + self.payload.len());
        packet.extend_from_slice(&self.service_id.to_be_bytes());
        packet.extend_from_slice(&self.method_id.to_be_bytes());
        packet.extend_from_slice(&length.to_be_bytes());
        packet.extend_from_slice(&self.request_id.to_be_bytes());
        packet.push(self.protocol_version);
        packet.push(self.interface_version);
        packet.push(self.message_type as u8);
        packet.push(self.return_code);
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Parsed header of an inbound datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Service identifier
    pub service_id: u16,
    /// Method identifier
    pub method_id: u16,
    /// Byte count after the length field (8 header bytes plus payload)
    pub length: u32,
    /// Correlation id chosen by the requester
    pub request_id: u32,
    /// Protocol framing version
    pub protocol_version: u8,
    /// Service interface version
    pub interface_version: u8,
    /// Raw message type byte, see [`MessageType`]
    pub message_type: u8,
    /// Return code, meaningful on RESPONSE and ERROR packets
    pub return_code: u8,
}

impl MessageHeader {
    /// Decode a datagram into its header and payload
    ///
    /// Fails with [`Error::InvalidPacket`] when the input is shorter than
    /// the 16-byte header. Everything from offset 16 onward is the payload.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < HEADER_LEN {
            return Err(Error::InvalidPacket(format!(
                "{} bytes, need at least {}",
                data.len(),
                HEADER_LEN
            )));
        }

        let header = MessageHeader {
            service_id: u16::from_be_bytes([
                data[OFFSET_SERVICE_ID],
                data[OFFSET_SERVICE_ID + 1],
            ]),
            method_id: u16::from_be_bytes([data[OFFSET_METHOD_ID], data[OFFSET_METHOD_ID + 1]]),
            length: u32::from_be_bytes([
                data[OFFSET_LENGTH],
                data[OFFSET_LENGTH + 1],
                data[OFFSET_LENGTH + 2],
                data[OFFSET_LENGTH + 3],
            ]),
            request_id: u32::from_be_bytes([
                data[OFFSET_REQUEST_ID],
                data[OFFSET_REQUEST_ID + 1],
                data[OFFSET_REQUEST_ID + 2],
                data[OFFSET_REQUEST_ID + 3],
            ]),
            protocol_version: data[OFFSET_PROTOCOL_VERSION],
            interface_version: data[OFFSET_INTERFACE_VERSION],
            message_type: data[OFFSET_MESSAGE_TYPE],
            return_code: data[OFFSET_RETURN_CODE],
        };

        Ok((header, &data[HEADER_LEN..]))
    }
}
