use super::sdf_shape::{SdfShapeRef, WeakSdfShapeRef};
use std::{
    rc::Rc,
    sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError},
};

/// Lifecycle notifications from the host about a shape's owner.
#[derive(Debug, Clone)]
pub enum ShapeEvent {
    /// The owner became active: register the shape.
    Activated(WeakSdfShapeRef),
    /// The owner became inactive or is being destroyed: unregister the shape.
    Deactivated(WeakSdfShapeRef),
}

impl ShapeEvent {
    pub fn activated(shape: &SdfShapeRef) -> Self {
        Self::Activated(Rc::downgrade(shape))
    }

    pub fn deactivated(shape: &SdfShapeRef) -> Self {
        Self::Deactivated(Rc::downgrade(shape))
    }
}

/// Hand this to hosts so they can raise [`ShapeEvent`]s from their own lifecycle callbacks.
/// Events sent before [`crate::engine::sdf_scene::SdfScene::advance_frame`] are applied at the
/// start of that frame, in send order.
#[derive(Clone)]
pub struct ShapeEventSender {
    tx: Sender<ShapeEvent>,
}

impl ShapeEventSender {
    pub fn send(&self, event: ShapeEvent) -> Result<(), SendError<ShapeEvent>> {
        self.tx.send(event)
    }

    pub fn activated(&self, shape: &SdfShapeRef) -> Result<(), SendError<ShapeEvent>> {
        self.send(ShapeEvent::activated(shape))
    }

    pub fn deactivated(&self, shape: &SdfShapeRef) -> Result<(), SendError<ShapeEvent>> {
        self.send(ShapeEvent::deactivated(shape))
    }
}

pub(crate) struct ShapeEventReceiver {
    rx: Receiver<ShapeEvent>,
}

impl ShapeEventReceiver {
    /// Ordered by time sent, i.e. first event in index 0
    pub fn get_events(&self) -> Vec<ShapeEvent> {
        let mut events = Vec::<ShapeEvent>::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                // can't disconnect while the receiver owner also holds a sender
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

pub(crate) fn shape_event_channel() -> (ShapeEventSender, ShapeEventReceiver) {
    let (tx, rx) = mpsc::channel::<ShapeEvent>();
    (ShapeEventSender { tx }, ShapeEventReceiver { rx })
}
