//! Internal macros.

/// Derive the by-value and mixed by-value/by-reference forms of a binary
/// operator, plus its `*Assign` counterparts, from an existing
/// `impl $Op<&T> for &T`.
macro_rules! impl_binop_variants {
    ($ty:ty, $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl $Op<$ty> for $ty {
            type Output = $ty;

            #[inline]
            fn $op(self, rhs: $ty) -> $ty {
                <&$ty as $Op<&$ty>>::$op(&self, &rhs)
            }
        }

        impl<'b> $Op<&'b $ty> for $ty {
            type Output = $ty;

            #[inline]
            fn $op(self, rhs: &'b $ty) -> $ty {
                <&$ty as $Op<&$ty>>::$op(&self, rhs)
            }
        }

        impl<'a> $Op<$ty> for &'a $ty {
            type Output = $ty;

            #[inline]
            fn $op(self, rhs: $ty) -> $ty {
                <&$ty as $Op<&$ty>>::$op(self, &rhs)
            }
        }

        impl $OpAssign<$ty> for $ty {
            #[inline]
            fn $op_assign(&mut self, rhs: $ty) {
                *self = <&$ty as $Op<&$ty>>::$op(self, &rhs);
            }
        }

        impl<'b> $OpAssign<&'b $ty> for $ty {
            #[inline]
            fn $op_assign(&mut self, rhs: &'b $ty) {
                *self = <&$ty as $Op<&$ty>>::$op(self, rhs);
            }
        }
    };
}
