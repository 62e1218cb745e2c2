use std::io::{Read, Write};

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Valid, Validate,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{As, Same};

use crate::engine::{
    DynMatrixEngine, DynVectorEngine, FixedMatrixEngine, FixedVectorEngine, MatrixEngine,
    VectorEngine, VectorEngineMut,
};
use crate::error::EngineError;
use crate::storage::StorageProvider;
use crate::traits::Scalar;

// Fixed engines serialize through a derived `serde_with` impl and deserialize through their
// checked `From` conversions. The resizable ones are written as their logical contents only, so
// capacity and provider never reach the wire.

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for FixedVectorEngine<T, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        As::<[Same; N]>::deserialize(deserializer).map(|elems: [T; N]| elems.into())
    }
}

impl<'de, T: Deserialize<'de>, const R: usize, const C: usize> Deserialize<'de>
    for FixedMatrixEngine<T, R, C>
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        As::<[[Same; C]; R]>::deserialize(deserializer).map(|elems: [[T; C]; R]| elems.into())
    }
}

impl<T: Scalar + Serialize, A: StorageProvider<Element = T>> Serialize for DynVectorEngine<T, A> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Scalar + Deserialize<'de>, A: StorageProvider<Element = T>> Deserialize<'de>
    for DynVectorEngine<T, A>
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(|x| x.into())
    }
}

#[derive(Serialize, Deserialize)]
struct DynMatrixRepr<T> {
    rows: usize,
    columns: usize,
    elements: Vec<T>,
}

impl<T: Scalar + Serialize, A: StorageProvider<Element = T>> Serialize for DynMatrixEngine<T, A> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        DynMatrixRepr {
            rows: self.rows(),
            columns: self.columns(),
            elements: self.iter_row_major().copied().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Scalar + Deserialize<'de>, A: StorageProvider<Element = T>> Deserialize<'de>
    for DynMatrixEngine<T, A>
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = DynMatrixRepr::<T>::deserialize(deserializer)?;
        let found = repr.elements.len();
        match repr.rows.checked_mul(repr.columns) {
            Some(expected) if expected == found => Ok(DynMatrixEngine::from_values(
                repr.rows,
                repr.columns,
                repr.elements,
            )),
            Some(expected) => Err(D::Error::custom(EngineError::InvalidData { expected, found })),
            None => Err(D::Error::custom(EngineError::InvalidData {
                expected: usize::MAX,
                found,
            })),
        }
    }
}

fn serialize_items<'a, T, W>(
    items: impl Iterator<Item = &'a T>,
    mut writer: W,
    compress: Compress,
) -> Result<(), SerializationError>
where
    T: CanonicalSerialize + 'a,
    W: Write,
{
    for item in items {
        item.serialize_with_mode(&mut writer, compress)?;
    }
    Ok(())
}

fn read_dimension<Re: Read>(
    reader: Re,
    compress: Compress,
    validate: Validate,
) -> Result<usize, SerializationError> {
    let n = u64::deserialize_with_mode(reader, compress, validate)?;
    usize::try_from(n).map_err(|_| SerializationError::InvalidData)
}

/// Reads `n` elements. The buffer grows with what is actually read, so a corrupt length prefix
/// fails on the missing data instead of on allocation.
fn read_items<T, Re>(
    mut reader: Re,
    n: usize,
    compress: Compress,
    validate: Validate,
) -> Result<Vec<T>, SerializationError>
where
    T: CanonicalDeserialize,
    Re: Read,
{
    let mut items = Vec::new();
    for _ in 0..n {
        items.push(T::deserialize_with_mode(&mut reader, compress, validate)?);
    }
    Ok(items)
}

impl<T: Scalar + CanonicalSerialize, const N: usize> CanonicalSerialize
    for FixedVectorEngine<T, N>
{
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        serialize_items(self.iter(), writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.iter().map(|x| x.serialized_size(compress)).sum()
    }
}

impl<T: Scalar + CanonicalDeserialize, const N: usize> Valid for FixedVectorEngine<T, N> {
    fn check(&self) -> Result<(), SerializationError> {
        T::batch_check(self.iter())
    }
}

impl<T: Scalar + CanonicalDeserialize, const N: usize> CanonicalDeserialize
    for FixedVectorEngine<T, N>
{
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let mut engine = Self::new();
        for slot in engine.iter_mut() {
            *slot = T::deserialize_with_mode(&mut reader, compress, validate)?;
        }
        Ok(engine)
    }
}

impl<T: Scalar + CanonicalSerialize, const R: usize, const C: usize> CanonicalSerialize
    for FixedMatrixEngine<T, R, C>
{
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        serialize_items(self.as_slice().iter(), writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.as_slice()
            .iter()
            .map(|x| x.serialized_size(compress))
            .sum()
    }
}

impl<T: Scalar + CanonicalDeserialize, const R: usize, const C: usize> Valid
    for FixedMatrixEngine<T, R, C>
{
    fn check(&self) -> Result<(), SerializationError> {
        T::batch_check(self.as_slice().iter())
    }
}

impl<T: Scalar + CanonicalDeserialize, const R: usize, const C: usize> CanonicalDeserialize
    for FixedMatrixEngine<T, R, C>
{
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let mut engine = Self::new();
        for slot in engine.as_mut_slice() {
            *slot = T::deserialize_with_mode(&mut reader, compress, validate)?;
        }
        Ok(engine)
    }
}

impl<T, A> CanonicalSerialize for DynVectorEngine<T, A>
where
    T: Scalar + CanonicalSerialize,
    A: StorageProvider<Element = T>,
{
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        (self.size() as u64).serialize_with_mode(&mut writer, compress)?;
        serialize_items(self.iter(), writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + self
            .iter()
            .map(|x| x.serialized_size(compress))
            .sum::<usize>()
    }
}

impl<T, A> Valid for DynVectorEngine<T, A>
where
    T: Scalar + CanonicalDeserialize,
    A: StorageProvider<Element = T> + Sync,
{
    fn check(&self) -> Result<(), SerializationError> {
        T::batch_check(self.iter())
    }
}

impl<T, A> CanonicalDeserialize for DynVectorEngine<T, A>
where
    T: Scalar + CanonicalDeserialize,
    A: StorageProvider<Element = T> + Sync,
{
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let n = read_dimension(&mut reader, compress, validate)?;
        let items = read_items(reader, n, compress, validate)?;
        Ok(items.into())
    }
}

impl<T, A> CanonicalSerialize for DynMatrixEngine<T, A>
where
    T: Scalar + CanonicalSerialize,
    A: StorageProvider<Element = T>,
{
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        let nrows = self.rows() as u64;
        let ncols = self.columns() as u64;
        nrows.serialize_with_mode(&mut writer, compress)?;
        ncols.serialize_with_mode(&mut writer, compress)?;
        serialize_items(self.iter_row_major(), writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + 8
            + self
                .iter_row_major()
                .map(|x| x.serialized_size(compress))
                .sum::<usize>()
    }
}

impl<T, A> Valid for DynMatrixEngine<T, A>
where
    T: Scalar + CanonicalDeserialize,
    A: StorageProvider<Element = T> + Sync,
{
    fn check(&self) -> Result<(), SerializationError> {
        T::batch_check(self.iter_row_major())
    }
}

impl<T, A> CanonicalDeserialize for DynMatrixEngine<T, A>
where
    T: Scalar + CanonicalDeserialize,
    A: StorageProvider<Element = T> + Sync,
{
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let nrows = read_dimension(&mut reader, compress, validate)?;
        let ncols = read_dimension(&mut reader, compress, validate)?;
        let n = nrows
            .checked_mul(ncols)
            .ok_or(SerializationError::InvalidData)?;
        let items: Vec<T> = read_items(reader, n, compress, validate)?;
        Ok(DynMatrixEngine::from_values(nrows, ncols, items))
    }
}

#[cfg(test)]
mod tests {
    use ark_std::test_rng;

    use super::*;

    #[test]
    fn test_serde_fixed() {
        let v = FixedVectorEngine::from([1.5f64, -2.0, 3.25]);
        let bytes = bincode::serialize(&v).unwrap();
        assert_eq!(bincode::deserialize::<FixedVectorEngine<f64, 3>>(&bytes).unwrap(), v);

        let m = FixedMatrixEngine::from([[1u8, 2, 3], [4, 5, 6]]);
        let bytes = bincode::serialize(&m).unwrap();
        assert_eq!(bincode::deserialize::<FixedMatrixEngine<u8, 2, 3>>(&bytes).unwrap(), m);
    }

    #[test]
    fn test_serde_dynamic_matrix_skips_capacity() {
        let mut m = DynMatrixEngine::<i32>::from_values(2, 2, [1, 2, 3, 4]);
        let compact = bincode::serialize(&m).unwrap();
        crate::engine::ResizableMatrixEngine::reserve(&mut m, 10, 10);
        assert_eq!(bincode::serialize(&m).unwrap(), compact);

        let back: DynMatrixEngine<i32> = bincode::deserialize(&compact).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.capacity(), (2, 2));
    }

    #[test]
    fn test_serde_dynamic_matrix_rejects_bad_shape() {
        let bytes = bincode::serialize(&(2usize, 2usize, vec![1i32, 2, 3])).unwrap();
        assert!(bincode::deserialize::<DynMatrixEngine<i32>>(&bytes).is_err());
    }

    #[test]
    fn test_serde_dynamic_vector() {
        let v = DynVectorEngine::<u16>::from_values([9u16, 8, 7]);
        let bytes = bincode::serialize(&v).unwrap();
        assert_eq!(bincode::deserialize::<DynVectorEngine<u16>>(&bytes).unwrap(), v);
    }

    #[test]
    fn test_canonical_fixed() {
        let rng = &mut test_rng();
        let m = FixedMatrixEngine::<u64, 3, 2>::rand(rng);
        let mut bytes = Vec::new();
        m.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(bytes.len(), m.compressed_size());
        assert_eq!(
            FixedMatrixEngine::<u64, 3, 2>::deserialize_compressed(&bytes[..]).unwrap(),
            m
        );
        assert!(FixedMatrixEngine::<u64, 3, 2>::deserialize_compressed(&bytes[..8]).is_err());
    }

    #[test]
    fn test_canonical_dynamic() {
        let m = DynMatrixEngine::<u64>::from_fn(2, 3, |i, j| (i * 3 + j) as u64);
        let mut bytes = Vec::new();
        m.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(bytes.len(), m.compressed_size());
        assert_eq!(
            DynMatrixEngine::<u64>::deserialize_compressed(&bytes[..]).unwrap(),
            m
        );

        let v = DynVectorEngine::<u64>::from_values([4u64, 5]);
        let mut bytes = Vec::new();
        v.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(
            DynVectorEngine::<u64>::deserialize_compressed(&bytes[..]).unwrap(),
            v
        );
    }

    #[test]
    fn test_canonical_dynamic_rejects_oversized_length() {
        let mut bytes = Vec::new();
        u64::MAX.serialize_compressed(&mut bytes).unwrap();
        assert!(DynVectorEngine::<u64>::deserialize_compressed(&bytes[..]).is_err());

        let mut bytes = Vec::new();
        (1u64 << 32).serialize_compressed(&mut bytes).unwrap();
        (1u64 << 31).serialize_compressed(&mut bytes).unwrap();
        7u64.serialize_compressed(&mut bytes).unwrap();
        assert!(DynMatrixEngine::<u64>::deserialize_compressed(&bytes[..]).is_err());
    }

    #[test]
    fn test_serde_fixed_goes_through_checked_conversion() {
        let bytes = bincode::serialize(&[4u8, 5, 6]).unwrap();
        let v: FixedVectorEngine<u8, 3> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(v.into_array(), [4, 5, 6]);
        assert!(bincode::deserialize::<FixedVectorEngine<u8, 3>>(&bytes[..2]).is_err());

        let bytes = bincode::serialize(&[[1i16, 2], [3, 4]]).unwrap();
        let m: FixedMatrixEngine<i16, 2, 2> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(m.into_rows(), [[1, 2], [3, 4]]);
    }

    #[test]
    fn test_canonical_dynamic_rejects_overflowing_shape() {
        let mut bytes = Vec::new();
        u64::MAX.serialize_compressed(&mut bytes).unwrap();
        2u64.serialize_compressed(&mut bytes).unwrap();
        assert!(DynMatrixEngine::<u64>::deserialize_compressed(&bytes[..]).is_err());
    }
}
