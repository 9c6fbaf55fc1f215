//! Generic RLP tree used at the boundary between `alloy-rlp` framing and the
//! fixed-shape plasma records.

use alloy_rlp::{Encodable, Header};
use tracing::trace;

use crate::error::{PlasmaResult, StructureError};

/// Deepest nesting accepted when decoding untrusted input
pub const MAX_DEPTH: usize = 16;

/// A decoded RLP item: either a byte string or a list of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpNode {
    Bytes(Vec<u8>),
    List(Vec<RlpNode>),
}

impl RlpNode {
    /// Canonical RLP encoding of this tree
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        trace!(length = out.len(), "Encoded RLP item");
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpNode::Bytes(bytes) => bytes.as_slice().encode(out),
            RlpNode::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload);
                }
                Header {
                    list: true,
                    payload_length: payload.len(),
                }
                .encode(out);
                out.extend_from_slice(&payload);
            }
        }
    }

    /// Decodes exactly one item spanning the whole buffer
    pub fn decode(bytes: &[u8]) -> PlasmaResult<Self> {
        let mut buf = bytes;
        let node = Self::decode_item(&mut buf, 0)?;
        if !buf.is_empty() {
            return Err(StructureError::TrailingBytes(buf.len()).into());
        }
        Ok(node)
    }

    fn decode_item(buf: &mut &[u8], depth: usize) -> PlasmaResult<Self> {
        if depth > MAX_DEPTH {
            return Err(StructureError::TooDeep(MAX_DEPTH).into());
        }

        let header = Header::decode(buf)?;
        if buf.len() < header.payload_length {
            return Err(alloy_rlp::Error::InputTooShort.into());
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;

        if !header.list {
            return Ok(RlpNode::Bytes(payload.to_vec()));
        }

        let mut items = Vec::new();
        let mut payload = payload;
        while !payload.is_empty() {
            items.push(Self::decode_item(&mut payload, depth + 1)?);
        }
        Ok(RlpNode::List(items))
    }

    /// Borrows the items of a list node
    pub fn as_list(&self, what: &'static str) -> Result<&[RlpNode], StructureError> {
        match self {
            RlpNode::List(items) => Ok(items),
            RlpNode::Bytes(_) => Err(StructureError::NotAList(what)),
        }
    }

    /// Borrows the items of a list node that must hold exactly `count` items
    pub fn as_list_of(
        &self,
        what: &'static str,
        count: usize,
    ) -> Result<&[RlpNode], StructureError> {
        let items = self.as_list(what)?;
        if items.len() != count {
            return Err(StructureError::WrongElementCount {
                what,
                expected: count,
                actual: items.len(),
            });
        }
        Ok(items)
    }

    /// Borrows the payload of a byte-string node
    pub fn as_bytes(&self, what: &'static str) -> Result<&[u8], StructureError> {
        match self {
            RlpNode::Bytes(bytes) => Ok(bytes),
            RlpNode::List(_) => Err(StructureError::NotBytes(what)),
        }
    }

    /// Strips one redundant level of wrapping: a list whose only element is
    /// itself a list yields that inner list.
    pub fn unwrap_single(&self) -> &RlpNode {
        match self {
            RlpNode::List(items) if items.len() == 1 && matches!(items[0], RlpNode::List(_)) => {
                &items[0]
            }
            _ => self,
        }
    }
}

impl From<Vec<u8>> for RlpNode {
    fn from(bytes: Vec<u8>) -> Self {
        RlpNode::Bytes(bytes)
    }
}

impl From<Vec<RlpNode>> for RlpNode {
    fn from(items: Vec<RlpNode>) -> Self {
        RlpNode::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlasmaError;

    #[test]
    fn test_encode_single_byte_is_its_own_encoding() {
        assert_eq!(RlpNode::Bytes(vec![0x00]).encode(), vec![0x00]);
        assert_eq!(RlpNode::Bytes(vec![0x7f]).encode(), vec![0x7f]);
        assert_eq!(RlpNode::Bytes(vec![0x80]).encode(), vec![0x81, 0x80]);
    }

    #[test]
    fn test_encode_nested_lists() {
        // [ [], [[]], [ [], [[]] ] ]
        let empty = RlpNode::List(vec![]);
        let one = RlpNode::List(vec![empty.clone()]);
        let two = RlpNode::List(vec![empty.clone(), one.clone()]);
        let tree = RlpNode::List(vec![empty, one, two]);
        assert_eq!(
            tree.encode(),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_decode_list() {
        // ["cat", "dog"]
        let bytes = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let node = RlpNode::decode(&bytes).unwrap();
        assert_eq!(
            node,
            RlpNode::List(vec![b"cat".to_vec().into(), b"dog".to_vec().into()])
        );
        assert_eq!(node.encode(), bytes.to_vec());
    }

    #[test]
    fn test_decode_long_string() {
        let payload = vec![0xaa; 60];
        let node = RlpNode::Bytes(payload.clone());
        let encoded = node.encode();
        assert_eq!(&encoded[..2], &[0xb8, 60]);
        assert_eq!(RlpNode::decode(&encoded).unwrap(), RlpNode::Bytes(payload));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let err = RlpNode::decode(&[0xc0, 0x01]).unwrap_err();
        assert_eq!(err, PlasmaError::DecodeStructure(StructureError::TrailingBytes(1)));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let err = RlpNode::decode(&[0xc3, 0x01]).unwrap_err();
        assert!(matches!(err, PlasmaError::Rlp(_)));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(RlpNode::decode(&[]), Err(PlasmaError::Rlp(_))));
    }

    #[test]
    fn test_decode_rejects_deep_nesting() {
        let mut node = RlpNode::List(vec![]);
        for _ in 0..=MAX_DEPTH {
            node = RlpNode::List(vec![node]);
        }
        let err = RlpNode::decode(&node.encode()).unwrap_err();
        assert_eq!(err, PlasmaError::DecodeStructure(StructureError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_shape_accessors() {
        let node = RlpNode::List(vec![RlpNode::Bytes(vec![1])]);
        assert!(node.as_bytes("node").is_err());
        assert_eq!(node.as_list("node").unwrap().len(), 1);
        assert_eq!(
            node.as_list_of("node", 2).unwrap_err(),
            StructureError::WrongElementCount {
                what: "node",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_unwrap_single() {
        let inner = RlpNode::List(vec![RlpNode::Bytes(vec![1]), RlpNode::Bytes(vec![2])]);
        let wrapped = RlpNode::List(vec![inner.clone()]);
        assert_eq!(wrapped.unwrap_single(), &inner);
        assert_eq!(inner.unwrap_single(), &inner);

        let single_bytes = RlpNode::List(vec![RlpNode::Bytes(vec![1])]);
        assert_eq!(single_bytes.unwrap_single(), &single_bytes);
    }
}
