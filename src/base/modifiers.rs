//! Declaration modifiers.

bitflags::bitflags! {
    /// Modifier bits attached to a declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC    = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE   = 1 << 2;
        const STATIC    = 1 << 3;
        const FINAL     = 1 << 4;
        const ABSTRACT  = 1 << 5;
        /// Generated by a transform or the runtime rather than written in source.
        const SYNTHETIC = 1 << 6;

        /// Bits that decide whether two declarations are the same logical member.
        const EQUIVALENCE = Self::PUBLIC.bits()
            | Self::PROTECTED.bits()
            | Self::PRIVATE.bits()
            | Self::STATIC.bits();

        const ACCESS = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    }
}

impl Modifiers {
    /// Modifiers reduced to the bits that participate in member identity.
    pub fn masked(self) -> Self {
        self & Self::EQUIVALENCE
    }

    /// No explicit access modifier: package-private in Java terms.
    pub fn is_package_private(self) -> bool {
        !self.intersects(Self::ACCESS)
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }
}
