//! Photo list update stream trait.

use std::sync::Arc;

use futures_core::Stream;

use crate::types::PhotoRecord;

/// Stream of photo list values, one per store mutation.
pub trait PhotoListUpdates: Stream<Item = Arc<Vec<PhotoRecord>>> + Send {}

impl<T> PhotoListUpdates for T where T: Stream<Item = Arc<Vec<PhotoRecord>>> + Send {}
