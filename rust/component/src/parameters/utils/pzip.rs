#[macro_export]
#[doc(hidden)]
macro_rules! pzip_part {
    (numeric $path:literal $params:ident) => {{
        use $crate::parameters::BufferStates;
        $crate::parameters::numeric_per_sample($params.get_numeric($path).unwrap())
    }};
    (switch $path:literal $params:ident) => {{
        use $crate::parameters::BufferStates;
        $crate::parameters::switch_per_sample($params.get_switch($path).unwrap())
    }};
}

/// Utility to get a per-sample iterator over the state of several parameters.
///
/// This indexes into a [`BufferStates`](crate::parameters::BufferStates)
/// with a list of parameter types and ids. With one parameter, the iterator
/// yields bare values; with more, it yields tuples in the order given.
///
/// Constant parameters repeat forever, so `take` the number of frames you
/// need unless at least one parameter is varying.
///
/// # Panics
///
/// Panics if a parameter is missing or has a different type than requested.
///
/// # Examples
///
/// ```
/// # use gainstage_component::pzip;
/// # use gainstage_component::parameters::{ConstantBufferStates, StaticInfoRef, TypeSpecificInfoRef};
/// let params = ConstantBufferStates::new_defaults(vec![
///     StaticInfoRef {
///         unique_id: "gain",
///         title: "Gain",
///         short_title: "Gain",
///         flags: Default::default(),
///         type_specific: TypeSpecificInfoRef::Numeric {
///             default: -6.0,
///             valid_range: -60.0..=12.0,
///             units: Some("dB"),
///         },
///     },
///     StaticInfoRef {
///         unique_id: "bypass",
///         title: "Bypass",
///         short_title: "Bypass",
///         flags: Default::default(),
///         type_specific: TypeSpecificInfoRef::Switch { default: false },
///     },
/// ]);
///
/// let samples: Vec<_> = pzip!(params[numeric "gain", switch "bypass"]).take(2).collect();
/// assert_eq!(samples, vec![(-6.0, false), (-6.0, false)]);
/// ```
#[macro_export]
macro_rules! pzip {
    ($params:ident[$($kind:ident $path:literal),+ $(,)?]) => {
        $crate::itertools::izip!($($crate::pzip_part!($kind $path $params)),+)
    };
}
