use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use troupe_proto::Fault;

/// Decodes call arguments on the serving side; a mismatch is the caller's
/// fault, hence [`FaultKind::BadArguments`](troupe_proto::FaultKind).
pub fn decode_args<T: DeserializeOwned>(args: Value) -> Result<T, Fault> {
    serde_json::from_value(args).map_err(Fault::bad_arguments)
}

pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Fault> {
    serde_json::to_value(value).map_err(Fault::failed)
}
