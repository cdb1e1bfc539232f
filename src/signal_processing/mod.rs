pub mod filter;
pub mod iir_butterworth;
pub mod math;

#[cfg(feature = "zero-phase-fir")]
pub mod fir_core;
#[cfg(feature = "zero-phase-fir")]
pub mod firwin;
#[cfg(feature = "zero-phase-fir")]
pub mod zero_phase_fir;

pub use filter::{
    FilterBand, FilterFamily, FilterSpec, FirDesign, FirFilterBackend, FirFilterParams, FirPhase,
    FirWindow, SignalFilter,
};
pub use iir_butterworth::{ButterworthFilter, IirButterworth};
pub use math::{as_vector, rms};

#[cfg(feature = "zero-phase-fir")]
pub use fir_core::FirFilterCore;
#[cfg(feature = "zero-phase-fir")]
pub use zero_phase_fir::ZeroPhaseFir;
