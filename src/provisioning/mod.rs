pub mod device;
pub mod id;
pub mod provisioner;

pub use device::{AuthMethod, DeviceState, ProvisionedDevice, X509Credentials};
pub use id::{UniqueIdGenerator, UuidGenerator};
pub use provisioner::DeviceProvisioner;
