use redb::TypeName;
pub use v1 as latest_record;

pub mod v1;

pub trait RecordVariant {
    const VERSION: u8;
}

#[derive(Debug, Clone)]
pub enum VersionedItem {
    V1(v1::ItemRecord),
}

impl redb::Value for VersionedItem {
    type SelfType<'a> = VersionedItem;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let (version, data) = data.split_first().expect("empty data");
        match *version {
            v1::ItemRecord::VERSION => {
                let v1 = postcard::from_bytes::<v1::ItemRecord>(data).expect("invalid record");
                VersionedItem::V1(v1)
            }
            version => panic!("unsupported version: {}", version),
        }
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        match value {
            VersionedItem::V1(v1) => {
                postcard::to_extend(v1, vec![v1::ItemRecord::VERSION]).unwrap()
            }
        }
    }

    fn type_name() -> TypeName {
        TypeName::new("lostfound::Item")
    }
}
