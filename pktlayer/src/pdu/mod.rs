//! Protocol layers and the chains they form.
//!
//! A [`Pdu`] is one protocol header that exclusively owns at most one inner
//! layer. The chain is a singly linked list of boxed trait objects running
//! from the outermost header to the innermost payload:
//!
//! ```text
//! Arp ──owns──> RawPdu ──owns──> (none)
//! ```
//!
//! Ownership is moved into the chain by [`Pdu::set_inner`] and moved back out
//! by [`Pdu::release_inner`], so the same layer can never be linked into two
//! chains. Cloning a chain clones every layer, and dropping the outer layer
//! drops the whole chain.
//!
//! Clone, comparison and teardown walk the chain in a loop rather than
//! recursing into the inner layer, so chain depth is bounded by memory, not
//! by the stack. Layer types get this by implementing `Clone`, `PartialEq`
//! and `Drop` on top of [`clone_chain`], [`chain_eq`] and [`unlink_chain`].

use core::any::Any;
use core::fmt;
use core::iter::FusedIterator;

use bytes::{Bytes, BytesMut};

mod raw;
pub use raw::RawPdu;

/// Tag identifying the concrete kind of a layer.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[non_exhaustive]
pub enum PduKind {
    /// Opaque payload bytes.
    Raw,
    /// Address Resolution Protocol.
    Arp,
}

impl fmt::Display for PduKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PduKind::Raw => "raw",
            PduKind::Arp => "arp",
        };
        f.write_str(name)
    }
}

/// An owned, nullable handle to the next layer of a chain.
pub type InnerPdu = Option<Box<dyn Pdu>>;

/// Object plumbing shared by every layer.
///
/// This trait is implemented automatically for every `Clone + PartialEq`
/// type that implements [`Pdu`]; it exists so that boxed layers can be cloned,
/// compared and downcast without knowing their concrete type.
pub trait PduBase: Any {
    /// View the layer as a trait object.
    fn as_dyn(&self) -> &(dyn Pdu + 'static);

    /// View the layer as a mutable trait object.
    fn as_dyn_mut(&mut self) -> &mut (dyn Pdu + 'static);

    /// Upcast for downcasting to the concrete layer type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete layer type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Deep-clone the layer and the chain it owns.
    fn clone_pdu(&self) -> Box<dyn Pdu>;

    /// Clone this layer alone, with no inner layer attached.
    fn clone_header(&self) -> Box<dyn Pdu>;

    /// Compare the headers of two layers, ignoring what they own.
    fn eq_header(&self, other: &dyn Pdu) -> bool;

    /// Compare with a layer of unknown type: equal only if both have the same
    /// concrete type, equal fields and equal inner chains.
    fn eq_pdu(&self, other: &dyn Pdu) -> bool;
}

impl<T> PduBase for T
where
    T: Pdu + Clone + PartialEq,
{
    fn as_dyn(&self) -> &(dyn Pdu + 'static) {
        self
    }

    fn as_dyn_mut(&mut self) -> &mut (dyn Pdu + 'static) {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn clone_header(&self) -> Box<dyn Pdu> {
        Box::new(self.detached())
    }

    fn eq_header(&self, other: &dyn Pdu) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self.header_eq(other))
    }

    fn eq_pdu(&self, other: &dyn Pdu) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }
}

/// One protocol layer.
///
/// Implementors describe their own header through [`kind`](Pdu::kind),
/// [`header_size`](Pdu::header_size) and [`write_header`](Pdu::write_header),
/// and give access to the slot holding their inner layer. Everything that
/// spans the chain is provided on top of that.
pub trait Pdu: PduBase + fmt::Debug + Send + Sync {
    /// The kind of this layer. Never changes after construction.
    fn kind(&self) -> PduKind;

    /// Byte length of this layer's own header, excluding the inner chain.
    fn header_size(&self) -> usize;

    /// Append exactly [`header_size`](Pdu::header_size) bytes of wire-format
    /// header to `buf`.
    fn write_header(&self, buf: &mut BytesMut);

    /// Storage for the inner layer.
    fn inner_slot(&self) -> &InnerPdu;

    /// Mutable storage for the inner layer.
    fn inner_slot_mut(&mut self) -> &mut InnerPdu;

    /// A copy of this layer's header with no inner layer attached.
    fn detached(&self) -> Self
    where
        Self: Sized;

    /// Whether two headers are equal, regardless of their inner layers.
    fn header_eq(&self, other: &Self) -> bool
    where
        Self: Sized;

    /// The inner layer, if one is attached.
    fn inner(&self) -> Option<&(dyn Pdu + 'static)> {
        self.inner_slot().as_deref()
    }

    /// The inner layer, mutably.
    fn inner_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.inner_slot_mut().as_deref_mut()
    }

    /// Attach `pdu` as the inner layer, dropping any layer attached before.
    fn set_inner(&mut self, pdu: Box<dyn Pdu>) {
        let outer = self.kind();
        let inner = pdu.kind();
        match self.inner_slot_mut().replace(pdu) {
            Some(old) => tracing::trace!(
                %outer,
                %inner,
                replaced = %old.kind(),
                "replaced inner pdu"
            ),
            None => tracing::trace!(%outer, %inner, "attached inner pdu"),
        }
    }

    /// Detach the inner layer and hand it to the caller.
    fn release_inner(&mut self) -> Option<Box<dyn Pdu>> {
        let released = self.inner_slot_mut().take();
        if let Some(pdu) = &released {
            tracing::trace!(outer = %self.kind(), inner = %pdu.kind(), "released inner pdu");
        }
        released
    }

    /// Iterate over this layer and every layer it owns, outermost first.
    fn layers(&self) -> Layers<'_> {
        Layers {
            next: Some(self.as_dyn()),
        }
    }

    /// Number of layers in the chain, this one included.
    fn depth(&self) -> usize {
        self.layers().count()
    }

    /// Byte length of [`serialize`](Pdu::serialize)'s output.
    fn size(&self) -> usize {
        self.layers().map(|layer| layer.header_size()).sum()
    }

    /// Append the wire format of this layer followed by its inner chain.
    fn serialize_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.size());
        for layer in self.layers() {
            let start = buf.len();
            layer.write_header(buf);
            debug_assert_eq!(buf.len() - start, layer.header_size());
        }
    }

    /// The wire format of this layer followed by its inner chain.
    fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.size());
        self.serialize_into(&mut buf);
        buf.freeze()
    }
}

impl<'a> dyn Pdu + 'a {
    /// Whether the layer is of concrete type `T`.
    pub fn is<T: Pdu>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to the concrete layer type.
    pub fn downcast_ref<T: Pdu>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcast to the concrete layer type, mutably.
    pub fn downcast_mut<T: Pdu>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// The first layer of type `T` in the chain, starting with this one.
    pub fn find_pdu<T: Pdu>(&self) -> Option<&T> {
        self.layers().find_map(|layer| layer.downcast_ref::<T>())
    }

    /// The first layer of type `T` in the chain, mutably.
    pub fn find_pdu_mut<T: Pdu>(&mut self) -> Option<&mut T> {
        let mut cur: &mut (dyn Pdu + 'a) = self;
        loop {
            if cur.is::<T>() {
                return cur.downcast_mut::<T>();
            }
            cur = cur.inner_mut()?;
        }
    }
}

impl PartialEq for dyn Pdu {
    fn eq(&self, other: &Self) -> bool {
        self.eq_pdu(other)
    }
}

impl Clone for Box<dyn Pdu> {
    fn clone(&self) -> Self {
        (**self).clone_pdu()
    }
}

/// Iterator over the layers of a chain, outermost first.
///
/// Created by [`Pdu::layers`].
#[derive(Debug, Clone)]
pub struct Layers<'a> {
    next: Option<&'a (dyn Pdu + 'static)>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a (dyn Pdu + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.inner();
        Some(cur)
    }
}

impl FusedIterator for Layers<'_> {}

/// Deep-clone the chain starting at `head`, one layer at a time.
pub fn clone_chain(head: Option<&(dyn Pdu + 'static)>) -> InnerPdu {
    let mut headers: Vec<Box<dyn Pdu>> = Layers { next: head }
        .map(|layer| layer.clone_header())
        .collect();

    let mut chain = None;
    while let Some(mut layer) = headers.pop() {
        *layer.inner_slot_mut() = chain;
        chain = Some(layer);
    }
    chain
}

/// Whether two chains have the same length and pairwise equal headers.
pub fn chain_eq(a: Option<&(dyn Pdu + 'static)>, b: Option<&(dyn Pdu + 'static)>) -> bool {
    let mut a = Layers { next: a };
    let mut b = Layers { next: b };
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.eq_header(y) => continue,
            _ => return false,
        }
    }
}

/// Drop the chain held in `slot` front to back.
///
/// Each layer is detached from its inner layer before it is dropped, so the
/// drop of any single layer never reaches further down the chain.
pub fn unlink_chain(slot: &mut InnerPdu) {
    let mut next = slot.take();
    while let Some(mut layer) = next {
        next = layer.inner_slot_mut().take();
    }
}
