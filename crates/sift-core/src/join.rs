//! Two-slot readiness join.
//!
//! Holds the two asynchronous readiness signals (data loaded, map ready) and
//! fires a single continuation once both are present, in either order.

pub struct ReadyJoin<D, M, R> {
    data: Option<D>,
    map: Option<M>,
    on_ready: Option<Box<dyn FnOnce(D, M) -> R + Send>>,
}

impl<D, M, R> ReadyJoin<D, M, R> {
    pub fn new(on_ready: impl FnOnce(D, M) -> R + Send + 'static) -> Self {
        Self {
            data: None,
            map: None,
            on_ready: Some(Box::new(on_ready)),
        }
    }

    /// Store the data payload. Returns the continuation's output if this call
    /// completed the join.
    pub fn set_data(&mut self, data: D) -> Option<R> {
        self.data = Some(data);
        self.try_join()
    }

    /// Store the map payload. Returns the continuation's output if this call
    /// completed the join.
    pub fn set_map(&mut self, map: M) -> Option<R> {
        self.map = Some(map);
        self.try_join()
    }

    pub fn is_complete(&self) -> bool {
        self.on_ready.is_none()
    }

    fn try_join(&mut self) -> Option<R> {
        if self.data.is_none() || self.map.is_none() {
            return None;
        }
        let on_ready = self.on_ready.take()?;
        let data = self.data.take()?;
        let map = self.map.take()?;
        tracing::debug!("ready join complete");
        Some(on_ready(data, map))
    }
}

impl<D, M, R> std::fmt::Debug for ReadyJoin<D, M, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadyJoin")
            .field("data", &self.data.is_some())
            .field("map", &self.map.is_some())
            .field("complete", &self.is_complete())
            .finish()
    }
}
