use std::fmt::Display;

macro_rules! decl_clamped_float {
    {$(#[$meta:meta])* $name:ident in [$min:literal, $max:literal], default $default:literal} => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(from = "f32", into = "f32"))]
        pub struct $name(f32);

        impl $name {
            /// The smallest accepted value.
            pub const MIN: f32 = $min;
            /// The largest accepted value.
            pub const MAX: f32 = $max;

            /// Clamps the given value to the interval
            #[doc = concat!("[", stringify!($min), ", ", stringify!($max), "]")]
            /// and constructs a new instance from it. `NaN` is replaced with the default value.
            pub fn new(value: f32) -> Self {
                if value.is_nan() {
                    Self::default()
                } else {
                    Self(value.clamp($min, $max))
                }
            }

            /// Returns the value encapsulated by this instance.
            pub fn value(&self) -> f32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl From<f32> for $name {
            fn from(source: f32) -> Self {
                Self::new(source)
            }
        }

        impl From<$name> for f32 {
            fn from(source: $name) -> Self {
                source.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

decl_clamped_float! {
    /// Speech rate as a multiple of the normal speed, in the interval [0.1, 10].
    Rate in [0.1, 10.0], default 1.0
}

decl_clamped_float! {
    /// Voice pitch, in the interval [0, 2], with 1 being the voice's normal pitch.
    Pitch in [0.0, 2.0], default 1.0
}

decl_clamped_float! {
    /// Speech volume, in the interval [0, 1], with 1 being full volume.
    Volume in [0.0, 1.0], default 1.0
}
