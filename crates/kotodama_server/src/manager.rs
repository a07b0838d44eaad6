//! Room registry shared by every connection task.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kotodama_core::PlayerId;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

use crate::protocol::ServerEvent;
use crate::room::{Delivery, Room, RoomSettings, RoomSummary};

/// Outbound queue of one connection.
pub type Outbox = UnboundedSender<ServerEvent>;

/// A room plus the queues of its connections, guarded together so that
/// state changes and their deliveries happen in one step.
#[derive(Debug)]
struct RoomSlot {
    room: Room,
    outboxes: HashMap<PlayerId, Outbox>,
}

impl RoomSlot {
    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            match delivery {
                Delivery::To { target, event } => self.send(&target, event),
                Delivery::Broadcast(event) => {
                    let targets: Vec<PlayerId> = self.outboxes.keys().cloned().collect();
                    for target in targets {
                        self.send(&target, event.clone());
                    }
                }
            }
        }
    }

    fn send(&mut self, target: &PlayerId, event: ServerEvent) {
        let Some(outbox) = self.outboxes.get(target) else {
            debug!(%target, "No open connection for delivery");
            return;
        };
        if outbox.send(event).is_err() {
            warn!(%target, "Connection queue closed, dropping it");
            self.outboxes.remove(target);
        }
    }

    fn is_abandoned(&self) -> bool {
        self.outboxes.is_empty()
            && self.room.connections().is_empty()
            && self.room.game().player_count() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Manages all rooms.
///
/// Every mutating request on a room runs under that room's lock, so
/// requests from concurrent connections are applied one at a time.
/// A room is dropped when its last connection leaves and nobody has
/// joined its game, unless it is pinned. The registry lock is always
/// taken before a room lock.
#[derive(Debug, Clone)]
pub struct RoomManager {
    rooms: Arc<Mutex<HashMap<String, Arc<Mutex<RoomSlot>>>>>,
    pinned: HashSet<String>,
    settings: RoomSettings,
}

impl RoomManager {
    /// Creates an empty registry.
    #[instrument]
    pub fn new(settings: RoomSettings) -> Self {
        info!("Creating room manager");
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            pinned: HashSet::new(),
            settings,
        }
    }

    /// Keeps `room_id` registered even while it sits empty.
    pub fn with_pinned_room(mut self, room_id: impl Into<String>) -> Self {
        self.pinned.insert(room_id.into());
        self
    }

    fn existing_slot(&self, room_id: &str) -> Option<Arc<Mutex<RoomSlot>>> {
        lock(&self.rooms).get(room_id).cloned()
    }

    /// Attaches a connection to a room, creating the room on first use.
    #[instrument(skip(self, outbox))]
    pub fn connect(&self, room_id: &str, conn: &PlayerId, outbox: Outbox) {
        let mut rooms = lock(&self.rooms);
        let slot = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(RoomSlot {
                    room: Room::new(room_id.to_string(), self.settings),
                    outboxes: HashMap::new(),
                }))
            })
            .clone();
        let mut slot = lock(&slot);
        drop(rooms);
        slot.outboxes.insert(conn.clone(), outbox);
        let deliveries = slot.room.connect(conn);
        slot.deliver(deliveries);
    }

    /// Handles one raw frame from a connection.
    #[instrument(skip(self, frame))]
    pub fn dispatch(&self, room_id: &str, conn: &PlayerId, frame: &str) {
        let Some(slot) = self.existing_slot(room_id) else {
            warn!("Frame for unknown room");
            return;
        };
        let mut slot = lock(&slot);
        let deliveries = slot.room.handle_frame(conn, frame);
        slot.deliver(deliveries);
    }

    /// Detaches a connection, dropping the room once it is abandoned.
    #[instrument(skip(self))]
    pub fn disconnect(&self, room_id: &str, conn: &PlayerId) {
        let mut rooms = lock(&self.rooms);
        let Some(slot) = rooms.get(room_id).cloned() else {
            return;
        };
        let mut slot = lock(&slot);
        slot.outboxes.remove(conn);
        slot.room.disconnect(conn);
        if slot.is_abandoned() && !self.pinned.contains(room_id) {
            info!("Removing empty room");
            rooms.remove(room_id);
        }
    }

    /// Lists rooms sorted by id.
    #[instrument(skip(self))]
    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        let slots: Vec<Arc<Mutex<RoomSlot>>> = lock(&self.rooms).values().cloned().collect();
        let mut summaries: Vec<RoomSummary> =
            slots.iter().map(|slot| lock(slot).room.summary()).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        info!(count = summaries.len(), "Listed rooms");
        summaries
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new(RoomSettings::default())
    }
}
