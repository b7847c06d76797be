/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and returns the value of
/// the expression.
#[cfg(not(all(target_arch = "wasm32", feature = "js")))]
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Re-implementation of the above macro for wasm, where `Instant` isn't
/// available
#[cfg(all(target_arch = "wasm32", feature = "js"))]
#[doc(hidden)]
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        // log level does nothing on the wasm version
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        use web_sys::console;

        // https://developer.mozilla.org/en-US/docs/Web/API/console/time
        console::time_with_label($label);
        let value = $ex;
        console::time_end_with_label($label);
        value
    }};
}

/// Calculate the number of cells in a super hexagon of the given radius.
/// Radius 0 means 1 cell, 1 is 7 cells, 2 is 19, etc.
pub fn hexagon_len(radius: u32) -> usize {
    // We'll always have 3r^2+3r+1 cells (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r cells for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Serialize a HexCoordinateIndexMap as a list instead of a map. This is
/// useful because coordinates shouldn't be used as serialized map keys, since
/// JSON and other formats don't support complex keys.
pub mod serde_coordinate_map_to_vec {
    use crate::{HasHexPosition, HexCoordinateIndexMap};
    use serde::{
        ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer,
    };

    /// Serialize a coordinate map as a list, in map order
    pub fn serialize<T, S>(
        map: &HexCoordinateIndexMap<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for value in map.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }

    /// Deserialize a list of values into a map. The deserialized type must
    /// implement [HasHexPosition] so that we can derive a coordinate for each
    /// element to use as its map key. If two elements share a position, the
    /// later one wins but the map keeps the first one's slot.
    pub fn deserialize<'de, T, D>(
        deserializer: D,
    ) -> Result<HexCoordinateIndexMap<T>, D::Error>
    where
        T: Deserialize<'de> + HasHexPosition,
        D: Deserializer<'de>,
    {
        let vec: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(vec
            .into_iter()
            .map(|element| (element.position(), element))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_len() {
        assert_eq!(hexagon_len(0), 1);
        assert_eq!(hexagon_len(1), 7);
        assert_eq!(hexagon_len(2), 19);
        assert_eq!(hexagon_len(3), 37);
    }
}
