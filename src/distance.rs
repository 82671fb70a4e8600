use crate::types::Sample;

/// Kilometres per degree used by [`FlatEarth`].
pub const KM_PER_DEGREE: f64 = 111.0;

/// Distance between two consecutive samples, in kilometres.
///
/// The extractor only ever asks for the displacement between neighbours,
/// so a model is free to ignore everything but position.
pub trait DistanceModel {
    fn distance_km(&self, from: &Sample, to: &Sample) -> f64;
}

/// Planar approximation: treats latitude and longitude degrees as equal
/// Cartesian units of 111 km.
///
/// There is no cos(latitude) correction on the longitude term, so east-west
/// distances are overstated away from the equator and the model breaks down
/// near the poles and over long hops. Good enough for short sampling
/// intervals at moderate latitudes; swap in another [`DistanceModel`] for
/// anything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatEarth;

impl DistanceModel for FlatEarth {
    fn distance_km(&self, from: &Sample, to: &Sample) -> f64 {
        let dx = to.latitude - from.latitude;
        let dy = to.longitude - from.longitude;
        (dx * dx + dy * dy).sqrt() * KM_PER_DEGREE
    }
}

impl<F> DistanceModel for F
where
    F: Fn(&Sample, &Sample) -> f64,
{
    fn distance_km(&self, from: &Sample, to: &Sample) -> f64 {
        self(from, to)
    }
}
