//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use devbook_domain::department::Department;
use devbook_domain::device::Device;
use devbook_domain::error::{ConflictError, DevbookError};
use devbook_domain::id::{DepartmentId, DeviceId, ImageId, ReservationId, UserId};
use devbook_domain::reservation::{Reservation, TimeWindow};
use devbook_domain::user::User;

use crate::ports::{
    CredentialHasher, DepartmentRepository, DeviceImage, DeviceRepository, ImageStore,
    ReservationRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepo {
    pub store: Mutex<HashMap<UserId, User>>,
    pub writes: AtomicUsize,
    pub deleted: Mutex<Vec<UserId>>,
}

impl InMemoryUserRepo {
    pub fn with(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::default();
        repo.store
            .lock()
            .unwrap()
            .extend(users.into_iter().map(|u| (u.id, u)));
        repo
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: UserId) -> Option<User> {
        self.store.lock().unwrap().get(&id).cloned()
    }
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let taken = store.values().any(|u| u.email == user.email);
        let result: Result<User, DevbookError> = if taken {
            Err(ConflictError::EmailTaken(user.email).into())
        } else {
            store.insert(user.id, user.clone());
            Ok(user)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        let result = self.stored(id);
        async { Ok(result) }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.values().find(|u| u.email == email).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<User> = store.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        store.insert(user.id, user.clone());
        async { Ok(user) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        self.deleted.lock().unwrap().push(id);
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryDepartmentRepo {
    pub store: Mutex<HashMap<DepartmentId, Department>>,
}

impl InMemoryDepartmentRepo {
    pub fn with(departments: impl IntoIterator<Item = Department>) -> Self {
        let repo = Self::default();
        repo.store
            .lock()
            .unwrap()
            .extend(departments.into_iter().map(|d| (d.id, d)));
        repo
    }
}

impl DepartmentRepository for InMemoryDepartmentRepo {
    fn create(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(department.id, department.clone());
        async { Ok(department) }
    }

    fn get_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Department>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Department> = store.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(department.id, department.clone());
        async { Ok(department) }
    }

    fn delete(&self, id: DepartmentId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    pub store: Mutex<HashMap<DeviceId, Device>>,
    pub writes: AtomicUsize,
    pub deleted: Mutex<Vec<DeviceId>>,
}

impl InMemoryDeviceRepo {
    pub fn with(devices: impl IntoIterator<Item = Device>) -> Self {
        let repo = Self::default();
        repo.store
            .lock()
            .unwrap()
            .extend(devices.into_iter().map(|d| (d.id, d)));
        repo
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let result: Result<Device, DevbookError> = if store
            .values()
            .any(|d| d.serial_number == device.serial_number)
        {
            Err(ConflictError::SerialNumberTaken(device.serial_number).into())
        } else {
            store.insert(device.id, device.clone());
            Ok(device)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_serial_number(
        &self,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store
            .values()
            .find(|d| d.serial_number == serial_number)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Device> = store.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        store.insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        self.deleted.lock().unwrap().push(id);
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

/// Reservation fake that runs the overlap check and the write under one lock,
/// like the conditional statements of the `SQLite` adapter.
#[derive(Default)]
pub struct InMemoryReservationRepo {
    pub store: Mutex<HashMap<ReservationId, Reservation>>,
    pub writes: AtomicUsize,
    pub deleted: Mutex<Vec<ReservationId>>,
}

impl InMemoryReservationRepo {
    pub fn with(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let repo = Self::default();
        repo.store
            .lock()
            .unwrap()
            .extend(reservations.into_iter().map(|r| (r.id, r)));
        repo
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: ReservationId) -> Option<Reservation> {
        self.store.lock().unwrap().get(&id).cloned()
    }
}

fn overlap_conflict(reservation: &Reservation) -> DevbookError {
    ConflictError::OverlappingReservation {
        user_id: reservation.user_id.to_string(),
        device_id: reservation.device_id.to_string(),
    }
    .into()
}

impl ReservationRepository for InMemoryReservationRepo {
    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, DevbookError>> + Send {
        let result = self.stored(id);
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Reservation> = store.values().cloned().collect();
        async { Ok(result) }
    }

    fn exists_overlapping(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        window: TimeWindow,
        exclude: Option<ReservationId>,
    ) -> impl Future<Output = Result<bool, DevbookError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.values().any(|r| {
            Some(r.id) != exclude
                && r.user_id == user_id
                && r.device_id == device_id
                && r.window.overlaps(&window)
        });
        async move { Ok(result) }
    }

    fn create_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let result = if store.values().any(|r| r.conflicts_with(&reservation)) {
            Err(overlap_conflict(&reservation))
        } else {
            store.insert(reservation.id, reservation.clone());
            Ok(reservation)
        };
        async { result }
    }

    fn update_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let result = if !store.contains_key(&reservation.id) {
            Err(DevbookError::not_found("Reservation", reservation.id))
        } else if store.values().any(|r| r.conflicts_with(&reservation)) {
            Err(overlap_conflict(&reservation))
        } else {
            store.insert(reservation.id, reservation.clone());
            Ok(reservation)
        };
        async { result }
    }

    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let result = if store.contains_key(&reservation.id) {
            store.insert(reservation.id, reservation.clone());
            Ok(reservation)
        } else {
            Err(DevbookError::not_found("Reservation", reservation.id))
        };
        async { result }
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        self.deleted.lock().unwrap().push(id);
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryImageStore {
    pub blobs: Mutex<HashMap<ImageId, DeviceImage>>,
}

impl ImageStore for InMemoryImageStore {
    fn store(
        &self,
        image: DeviceImage,
    ) -> impl Future<Output = Result<ImageId, DevbookError>> + Send {
        let id = ImageId::new();
        self.blobs.lock().unwrap().insert(id, image);
        async move { Ok(id) }
    }

    fn load(
        &self,
        id: ImageId,
    ) -> impl Future<Output = Result<Option<DeviceImage>, DevbookError>> + Send {
        let result = self.blobs.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }
}

/// Hasher that maps every password to a fixed string and records its inputs.
pub struct StubHasher {
    pub output: &'static str,
    pub calls: Mutex<Vec<String>>,
}

impl StubHasher {
    pub fn returning(output: &'static str) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CredentialHasher for StubHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DevbookError> {
        self.calls.lock().unwrap().push(plaintext.to_string());
        Ok(self.output.to_string())
    }
}
