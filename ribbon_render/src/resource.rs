// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque texture keys for backend-managed textures.

use core::fmt;

/// An opaque handle to a backend-managed texture.
///
/// Keys are assigned by backends and passed through the draw plan without
/// interpretation. The gallery uses them directly as its texture handle type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureKey(pub u64);

impl fmt::Debug for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureKey({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn debug_is_compact() {
        assert_eq!(format!("{:?}", TextureKey(7)), "TextureKey(7)");
    }
}
