macro_rules! info {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
    );
}

macro_rules! warning {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    );
}

macro_rules! trace {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)+);
    );
}

pub(crate) use info;
pub(crate) use trace;
pub(crate) use warning;
