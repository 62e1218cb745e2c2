//! Storage providers for resizable engines.
//!
//! A provider is bound to one element type and can be rebound to another. Resizable engines use
//! the rebinding when a result has to hold a different element type than its operands. Fixed-size
//! engines own an inline array and never touch a provider.

use std::marker::PhantomData;

pub trait StorageProvider: Clone + Default {
    type Element;

    /// The same provider, supplying storage for `U` instead.
    type Rebind<U>: StorageProvider<Element = U>;

    /// Returns an empty buffer able to hold at least `capacity` elements.
    fn allocate(&self, capacity: usize) -> Vec<Self::Element>;
}

/// `A` rebound to supply storage for `U`.
pub type Rebound<A, U> = <A as StorageProvider>::Rebind<U>;

/// The global heap.
#[derive(Debug)]
pub struct HeapStorage<T>(PhantomData<fn() -> T>);

impl<T> Clone for HeapStorage<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HeapStorage<T> {}

impl<T> Default for HeapStorage<T> {
    fn default() -> Self {
        HeapStorage(PhantomData)
    }
}

impl<T> PartialEq for HeapStorage<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for HeapStorage<T> {}

impl<T> StorageProvider for HeapStorage<T> {
    type Element = T;
    type Rebind<U> = HeapStorage<U>;

    #[inline]
    fn allocate(&self, capacity: usize) -> Vec<T> {
        Vec::with_capacity(capacity)
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;

    #[test]
    fn test_rebind() {
        assert_eq!(
            TypeId::of::<Rebound<HeapStorage<f32>, f64>>(),
            TypeId::of::<HeapStorage<f64>>()
        );
        assert_eq!(
            TypeId::of::<Rebound<Rebound<HeapStorage<f32>, i8>, f32>>(),
            TypeId::of::<HeapStorage<f32>>()
        );
    }

    #[test]
    fn test_allocate() {
        let buf = HeapStorage::<u64>::default().allocate(17);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 17);
    }
}
