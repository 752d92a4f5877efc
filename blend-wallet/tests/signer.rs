use blend_primitives::{
    Fragment, NetworkId, Operation, OperationKind, Transaction, TransactionEnvelope,
    TESTNET_PASSPHRASE,
};
use blend_wallet::{is_signed_by, KeypairSigner, PrivateKey, Signer, SignerError};

const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const OTHER: &str = "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb";

fn envelope_for(key: &PrivateKey) -> TransactionEnvelope {
    TransactionEnvelope::unsigned(Transaction {
        source: key.account_id(),
        fee: 100,
        sequence: 7,
        time_bounds: None,
        operations: vec![Operation::new(OperationKind::Payment, vec![1, 2])],
        soroban_data: None,
    })
}

#[tokio::test]
async fn keypair_signer_adds_verifiable_signature() {
    let key: PrivateKey = SEED.parse().unwrap();
    let unsigned = envelope_for(&key);
    let account = key.account_id();

    let signer = KeypairSigner::new(key);

    let signed = signer
        .sign(unsigned.to_base64().unwrap(), TESTNET_PASSPHRASE)
        .await
        .unwrap();

    let signed = TransactionEnvelope::from_base64(&signed).unwrap();

    assert_eq!(signed.tx, unsigned.tx);
    assert_eq!(signed.signatures.len(), 1);
    assert_eq!(
        signed.signatures[0].hint.as_slice(),
        account.signature_hint()
    );

    assert!(is_signed_by(&signed, &account, &NetworkId::testnet()).unwrap());
    assert!(!is_signed_by(&signed, &account, &NetworkId::public()).unwrap());
}

#[tokio::test]
async fn refuses_foreign_source_account() {
    let key: PrivateKey = SEED.parse().unwrap();
    let other: PrivateKey = OTHER.parse().unwrap();

    let unsigned = envelope_for(&other).to_base64().unwrap();
    let signer = KeypairSigner::new(key);

    let err = signer.sign(unsigned, TESTNET_PASSPHRASE).await.unwrap_err();

    assert!(matches!(err, SignerError::UnknownAccount(id) if id == other.account_id()));
}

#[tokio::test]
async fn garbage_envelope_is_a_codec_error() {
    let signer = KeypairSigner::new(SEED.parse().unwrap());

    let err = signer
        .sign("%%%".to_string(), TESTNET_PASSPHRASE)
        .await
        .unwrap_err();

    assert!(matches!(err, SignerError::Codec(_)));
}

#[tokio::test]
async fn shared_signer_delegates() {
    let signer: std::sync::Arc<dyn Signer> =
        std::sync::Arc::new(KeypairSigner::new(SEED.parse().unwrap()));

    let key: PrivateKey = SEED.parse().unwrap();
    let unsigned = envelope_for(&key).to_base64().unwrap();

    let signed = signer.sign(unsigned, TESTNET_PASSPHRASE).await.unwrap();
    let signed = TransactionEnvelope::from_base64(&signed).unwrap();

    assert!(signed.is_signed());
}
