use std::str::FromStr;

use tally_state::Prefix;

use crate::default_context::DefaultContext;
use crate::utils::generate_address;
use crate::{Address, Context, ModulePrefix};

#[test]
fn test_address_serialization() {
    let address = Address::from([11; 32]);
    let data: String = serde_json::to_string(&address).unwrap();
    let deserialized_address = serde_json::from_str::<Address>(&data).unwrap();

    assert_eq!(address, deserialized_address);
    assert_eq!(
        deserialized_address.to_string(),
        "0x0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b"
    );
}

#[test]
fn test_address_from_str_and_slice() {
    let address = Address::from([7; 32]);
    assert_eq!(Address::from_str(&address.to_string()).unwrap(), address);
    assert!(Address::from_str("0x0102").is_err());
    assert!(Address::try_from(&[1u8; 31][..]).is_err());
}

#[test]
fn test_generate_address_is_deterministic() {
    let admin = generate_address::<DefaultContext>("admin");
    assert_eq!(admin, generate_address::<DefaultContext>("admin"));
    assert_ne!(admin, generate_address::<DefaultContext>("voter_1"));

    let context = DefaultContext::new(admin);
    assert_eq!(context.sender(), &admin);
}

#[test]
fn test_module_prefix_is_unique_per_field() {
    let admin = ModulePrefix::new_storage("tally_election", "Election", "admin");
    let candidates = ModulePrefix::new_storage("tally_election", "Election", "candidates");
    let module = ModulePrefix::new_module("tally_election", "Election");

    assert_eq!(
        Prefix::from(admin.clone()).as_bytes(),
        b"tally_election/Election/admin/"
    );
    assert_ne!(
        admin.hash::<DefaultContext>(),
        candidates.hash::<DefaultContext>()
    );
    assert_eq!(
        Prefix::from(module).as_bytes(),
        b"tally_election/Election/"
    );
}
