//! Magic-header framed storage of fixed size records.

const MAGIC_HEADER: u16 = 0xB0A2;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    DriverError,
    InvalidMagicHeader,
    InvalidData,
}

pub trait Encodable<const SIZE: usize>
where
    Self: Sized,
{
    fn encode(self) -> [u8; SIZE];
    fn decode(data: &[u8]) -> Option<Self>;
}

#[allow(async_fn_in_trait)]
pub trait StorageDriver<const STORAGE_SIZE: usize> {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError>;
    async fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError>;
}

/// Record store on top of a storage driver.
///
/// `STORAGE_SIZE` is the size of the area the driver reads and writes in one
/// go; the encoded record has to fit behind the header.
pub struct PersistentStorage<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize> {
    driver: DRIVER,
}

impl<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize>
    PersistentStorage<DRIVER, STORAGE_SIZE>
{
    pub fn new(driver: DRIVER) -> Self {
        Self { driver }
    }

    pub fn into_inner(self) -> DRIVER {
        self.driver
    }

    pub async fn load<const SIZE: usize, T: Encodable<SIZE>>(&mut self) -> Result<T, StorageError> {
        if MAGIC_HEADER_SIZE + SIZE > STORAGE_SIZE {
            return Err(StorageError::InvalidData);
        }
        let mut buffer = [0u8; STORAGE_SIZE];
        self.driver.read(&mut buffer).await?;

        let magic = u16::from_le_bytes([buffer[0], buffer[1]]);
        if magic != MAGIC_HEADER {
            return Err(StorageError::InvalidMagicHeader);
        }
        T::decode(&buffer[MAGIC_HEADER_SIZE..MAGIC_HEADER_SIZE + SIZE])
            .ok_or(StorageError::InvalidData)
    }

    pub async fn save<const SIZE: usize, T: Encodable<SIZE> + Clone>(
        &mut self,
        record: &T,
    ) -> Result<(), StorageError> {
        if MAGIC_HEADER_SIZE + SIZE > STORAGE_SIZE {
            return Err(StorageError::InvalidData);
        }
        let mut data = [0u8; STORAGE_SIZE];
        data[0..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        data[MAGIC_HEADER_SIZE..MAGIC_HEADER_SIZE + SIZE].copy_from_slice(&record.clone().encode());

        self.driver.write(&data).await
    }
}
