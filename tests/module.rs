mod common;

use common::{attributes, StubServer};
use homeassistant_camera::proto::camera_service_server::CameraService;
use homeassistant_camera::proto::module_service_server::ModuleService;
use homeassistant_camera::proto::{
    AddResourceRequest, ComponentConfig, GetImageRequest, GetImagesRequest, GetPointCloudRequest,
    GetPropertiesRequest, ReadyRequest, ReconfigureResourceRequest, RemoveResourceRequest,
    ValidateConfigRequest,
};
use homeassistant_camera::{CameraModule, HomeAssistantCamera};
use tonic::{Code, Request};

fn component(name: &str, pairs: &[(&str, &str)]) -> ComponentConfig {
    ComponentConfig {
        name: name.to_string(),
        model: "hipsterbrown:camera:homeassistant".to_string(),
        attributes: Some(attributes(pairs)),
        api: "rdk:component:camera".to_string(),
    }
}

async fn module_with(
    stub: &StubServer,
    name: &str,
    entity_id: &str,
) -> CameraModule<HomeAssistantCamera> {
    let module = CameraModule::<HomeAssistantCamera>::new();
    module
        .add_resource(Request::new(AddResourceRequest {
            config: Some(component(
                name,
                &[
                    ("host_address", stub.host_address().as_str()),
                    ("access_token", "tok1"),
                    ("entity_id", entity_id),
                ],
            )),
            dependencies: vec![],
        }))
        .await
        .unwrap();
    module
}

fn image_request(name: &str) -> Request<GetImageRequest> {
    Request::new(GetImageRequest {
        name: name.to_string(),
        mime_type: "image/jpeg".to_string(),
        extra: None,
    })
}

#[tokio::test]
async fn ready_announces_camera_model() {
    let module = CameraModule::<HomeAssistantCamera>::new();
    let response = module
        .ready(Request::new(ReadyRequest {
            parent_address: "/tmp/parent.sock".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.ready);
    assert_eq!(response.handlers.len(), 1);
    assert_eq!(response.handlers[0].api, "rdk:component:camera");
    assert_eq!(
        response.handlers[0].models,
        vec!["hipsterbrown:camera:homeassistant".to_string()]
    );
}

#[tokio::test]
async fn validate_config_checks_required_attributes() {
    let module = CameraModule::<HomeAssistantCamera>::new();

    let status = module
        .validate_config(Request::new(ValidateConfigRequest {
            config: Some(component("door", &[("entity_id", "camera.door")])),
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = module
        .validate_config(Request::new(ValidateConfigRequest {
            config: Some(component("door", &[("access_token", "tok1")])),
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let response = module
        .validate_config(Request::new(ValidateConfigRequest {
            config: Some(component(
                "door",
                &[("access_token", "tok1"), ("entity_id", "camera.door")],
            )),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(response.dependencies.is_empty());
    assert!(module.resource_names().await.is_empty());
}

#[tokio::test]
async fn add_resource_rejects_foreign_model() {
    let module = CameraModule::<HomeAssistantCamera>::new();
    let mut config = component(
        "door",
        &[("access_token", "tok1"), ("entity_id", "camera.door")],
    );
    config.model = "rdk:builtin:webcam".to_string();

    let status = module
        .add_resource(Request::new(AddResourceRequest {
            config: Some(config),
            dependencies: vec![],
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(module.resource_names().await.is_empty());
}

#[tokio::test]
async fn get_image_routes_to_named_resource() {
    let stub = StubServer::start(200, b"\x89PNGtest").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    let response = module
        .get_image(image_request("front_door"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(response.image, b"\x89PNGtest".to_vec());
    assert_eq!(response.mime_type, "image/jpeg");

    let status = module
        .get_image(image_request("back_door"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn remote_failure_is_unavailable() {
    let stub = StubServer::start(404, b"").await;
    let module = module_with(&stub, "front_door", "camera.missing").await;

    let status = module
        .get_image(image_request("front_door"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unavailable);
}

#[tokio::test]
async fn grpc_deadline_bounds_snapshot_request() {
    let stub = StubServer::start_delayed(200, b"late", std::time::Duration::from_secs(5)).await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    let mut request = image_request("front_door");
    request
        .metadata_mut()
        .insert("grpc-timeout", "100m".parse().unwrap());

    let status = module.get_image(request).await.unwrap_err();
    assert_eq!(status.code(), Code::DeadlineExceeded);
}

#[tokio::test]
async fn unsupported_calls_are_unimplemented() {
    let stub = StubServer::start(200, b"frame").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    let status = module
        .get_images(Request::new(GetImagesRequest {
            name: "front_door".to_string(),
            extra: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unimplemented);

    let status = module
        .get_point_cloud(Request::new(GetPointCloudRequest {
            name: "front_door".to_string(),
            mime_type: "pointcloud/pcd".to_string(),
            extra: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unimplemented);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn properties_carry_no_calibration() {
    let stub = StubServer::start(200, b"frame").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    let response = module
        .get_properties(Request::new(GetPropertiesRequest {
            name: "front_door".to_string(),
            extra: None,
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(!response.supports_pcd);
    let intrinsics = response.intrinsic_parameters.unwrap();
    assert_eq!(intrinsics.width_px, 0);
    assert_eq!(intrinsics.focal_x_px, 0.0);
    let distortion = response.distortion_parameters.unwrap();
    assert!(distortion.model.is_empty());
    assert!(distortion.parameters.is_empty());
}

#[tokio::test]
async fn reconfigure_resource_updates_entity() {
    let stub = StubServer::start(200, b"frame").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    module
        .reconfigure_resource(Request::new(ReconfigureResourceRequest {
            config: Some(component(
                "front_door",
                &[
                    ("host_address", stub.host_address().as_str()),
                    ("access_token", "tok2"),
                    ("entity_id", "camera.porch"),
                ],
            )),
            dependencies: vec![],
        }))
        .await
        .unwrap();

    module.get_image(image_request("front_door")).await.unwrap();

    let requests = stub.requests();
    let request = requests.last().unwrap().to_lowercase();
    assert!(request.starts_with("get /api/camera_proxy/camera.porch "));
    assert!(request.contains("authorization: bearer tok2\r\n"));
}

#[tokio::test]
async fn reconfigure_unknown_resource_is_not_found() {
    let module = CameraModule::<HomeAssistantCamera>::new();

    let status = module
        .reconfigure_resource(Request::new(ReconfigureResourceRequest {
            config: Some(component(
                "ghost",
                &[("access_token", "tok1"), ("entity_id", "camera.ghost")],
            )),
            dependencies: vec![],
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn removed_resource_is_closed_and_unreachable() {
    let stub = StubServer::start(200, b"frame").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;
    let camera = module.resource("front_door").await.unwrap();

    module
        .remove_resource(Request::new(RemoveResourceRequest {
            name: "front_door".to_string(),
        }))
        .await
        .unwrap();

    assert!(camera.config().await.is_none());
    let status = module
        .get_image(image_request("front_door"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = module
        .remove_resource(Request::new(RemoveResourceRequest {
            name: "front_door".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn close_all_empties_registry() {
    let stub = StubServer::start(200, b"frame").await;
    let module = module_with(&stub, "front_door", "camera.front_door").await;

    module.close_all().await;

    assert!(module.resource_names().await.is_empty());
}
