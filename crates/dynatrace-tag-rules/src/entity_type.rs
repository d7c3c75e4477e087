// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Monitored entity types a tag rule can attach to.
//!
//! The set is closed: any identifier not listed here is rejected with
//! [`VocabularyError::UnknownEntityType`]. Matching is exact and case-sensitive.

use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};

use crate::errors::VocabularyError;

/// Declares the entity type enum together with its identifier table, so the two can
/// never drift apart.
macro_rules! entity_types {
    ($($variant:ident => $name:literal,)+) => {
        /// A Dynatrace monitored entity type (`meType`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EntityType {
            $($variant,)+
        }

        impl EntityType {
            /// Every known entity type, in identifier order.
            pub const ALL: &'static [EntityType] = &[$(EntityType::$variant,)+];

            /// The wire identifier, e.g. `PROCESS_GROUP`.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(EntityType::$variant => $name,)+
                }
            }
        }

        impl FromStr for EntityType {
            type Err = VocabularyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(EntityType::$variant),)+
                    _ => Err(VocabularyError::UnknownEntityType(s.to_string())),
                }
            }
        }
    };
}

entity_types! {
    ApmSecurityGateway => "APM_SECURITY_GATEWAY",
    Application => "APPLICATION",
    ApplicationMethod => "APPLICATION_METHOD",
    ApplicationMethodGroup => "APPLICATION_METHOD_GROUP",
    AppmonServer => "APPMON_SERVER",
    AppmonSystemProfile => "APPMON_SYSTEM_PROFILE",
    AutoScalingGroup => "AUTO_SCALING_GROUP",
    AuxiliarySyntheticTest => "AUXILIARY_SYNTHETIC_TEST",
    AwsApplicationLoadBalancer => "AWS_APPLICATION_LOAD_BALANCER",
    AwsAvailabilityZone => "AWS_AVAILABILITY_ZONE",
    AwsCredentials => "AWS_CREDENTIALS",
    AwsLambdaFunction => "AWS_LAMBDA_FUNCTION",
    AwsNetworkLoadBalancer => "AWS_NETWORK_LOAD_BALANCER",
    AzureApiManagementService => "AZURE_API_MANAGEMENT_SERVICE",
    AzureApplicationGateway => "AZURE_APPLICATION_GATEWAY",
    AzureCosmosDb => "AZURE_COSMOS_DB",
    AzureCredentials => "AZURE_CREDENTIALS",
    AzureEventHub => "AZURE_EVENT_HUB",
    AzureEventHubNamespace => "AZURE_EVENT_HUB_NAMESPACE",
    AzureFunctionApp => "AZURE_FUNCTION_APP",
    AzureIotHub => "AZURE_IOT_HUB",
    AzureLoadBalancer => "AZURE_LOAD_BALANCER",
    AzureMgmtGroup => "AZURE_MGMT_GROUP",
    AzureRedisCache => "AZURE_REDIS_CACHE",
    AzureRegion => "AZURE_REGION",
    AzureServiceBusNamespace => "AZURE_SERVICE_BUS_NAMESPACE",
    AzureServiceBusQueue => "AZURE_SERVICE_BUS_QUEUE",
    AzureServiceBusTopic => "AZURE_SERVICE_BUS_TOPIC",
    AzureSqlDatabase => "AZURE_SQL_DATABASE",
    AzureSqlElasticPool => "AZURE_SQL_ELASTIC_POOL",
    AzureSqlServer => "AZURE_SQL_SERVER",
    AzureStorageAccount => "AZURE_STORAGE_ACCOUNT",
    AzureSubscription => "AZURE_SUBSCRIPTION",
    AzureTenant => "AZURE_TENANT",
    AzureVm => "AZURE_VM",
    AzureVmScaleSet => "AZURE_VM_SCALE_SET",
    AzureWebApp => "AZURE_WEB_APP",
    CfApplication => "CF_APPLICATION",
    CfFoundation => "CF_FOUNDATION",
    CinderVolume => "CINDER_VOLUME",
    CloudApplication => "CLOUD_APPLICATION",
    CloudApplicationInstance => "CLOUD_APPLICATION_INSTANCE",
    CloudApplicationNamespace => "CLOUD_APPLICATION_NAMESPACE",
    ContainerGroup => "CONTAINER_GROUP",
    ContainerGroupInstance => "CONTAINER_GROUP_INSTANCE",
    CustomApplication => "CUSTOM_APPLICATION",
    CustomDevice => "CUSTOM_DEVICE",
    CustomDeviceGroup => "CUSTOM_DEVICE_GROUP",
    DcrumApplication => "DCRUM_APPLICATION",
    DcrumService => "DCRUM_SERVICE",
    DcrumServiceInstance => "DCRUM_SERVICE_INSTANCE",
    DeviceApplicationMethod => "DEVICE_APPLICATION_METHOD",
    Disk => "DISK",
    DockerContainerGroup => "DOCKER_CONTAINER_GROUP",
    DockerContainerGroupInstance => "DOCKER_CONTAINER_GROUP_INSTANCE",
    DynamoDbTable => "DYNAMO_DB_TABLE",
    EbsVolume => "EBS_VOLUME",
    Ec2Instance => "EC2_INSTANCE",
    ElasticLoadBalancer => "ELASTIC_LOAD_BALANCER",
    Environment => "ENVIRONMENT",
    ExternalSyntheticTestStep => "EXTERNAL_SYNTHETIC_TEST_STEP",
    GcpZone => "GCP_ZONE",
    Geolocation => "GEOLOCATION",
    GeolocSite => "GEOLOC_SITE",
    GoogleComputeEngine => "GOOGLE_COMPUTE_ENGINE",
    Host => "HOST",
    HostGroup => "HOST_GROUP",
    HttpCheck => "HTTP_CHECK",
    HttpCheckStep => "HTTP_CHECK_STEP",
    Hypervisor => "HYPERVISOR",
    KubernetesCluster => "KUBERNETES_CLUSTER",
    KubernetesNode => "KUBERNETES_NODE",
    MobileApplication => "MOBILE_APPLICATION",
    NetworkInterface => "NETWORK_INTERFACE",
    NeutronSubnet => "NEUTRON_SUBNET",
    OpenstackProject => "OPENSTACK_PROJECT",
    OpenstackRegion => "OPENSTACK_REGION",
    OpenstackVm => "OPENSTACK_VM",
    Os => "OS",
    ProcessGroup => "PROCESS_GROUP",
    ProcessGroupInstance => "PROCESS_GROUP_INSTANCE",
    RelationalDatabaseService => "RELATIONAL_DATABASE_SERVICE",
    Service => "SERVICE",
    ServiceInstance => "SERVICE_INSTANCE",
    ServiceMethod => "SERVICE_METHOD",
    ServiceMethodGroup => "SERVICE_METHOD_GROUP",
    SwiftContainer => "SWIFT_CONTAINER",
    SyntheticLocation => "SYNTHETIC_LOCATION",
    SyntheticTest => "SYNTHETIC_TEST",
    SyntheticTestStep => "SYNTHETIC_TEST_STEP",
    Virtualmachine => "VIRTUALMACHINE",
    VmwareDatacenter => "VMWARE_DATACENTER",
}

impl AsRef<str> for EntityType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_entity_types() {
        assert_eq!(EntityType::from_str("HOST"), Ok(EntityType::Host));
        assert_eq!(
            EntityType::from_str("PROCESS_GROUP"),
            Ok(EntityType::ProcessGroup)
        );
        assert_eq!(EntityType::from_str("SERVICE"), Ok(EntityType::Service));
        assert_eq!(EntityType::from_str("OS"), Ok(EntityType::Os));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            EntityType::from_str("host"),
            Err(VocabularyError::UnknownEntityType("host".to_string()))
        );
        assert!(EntityType::from_str(" HOST").is_err());
        assert!(EntityType::from_str("").is_err());
    }

    #[test]
    fn test_unknown_entity_type() {
        assert_eq!(
            EntityType::from_str("TEST"),
            Err(VocabularyError::UnknownEntityType("TEST".to_string()))
        );
    }

    #[test]
    fn test_identifier_table_round_trips() {
        assert_eq!(EntityType::ALL.len(), 92);
        for entity_type in EntityType::ALL {
            assert_eq!(EntityType::from_str(entity_type.as_str()), Ok(*entity_type));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            EntityType::AwsLambdaFunction.to_string(),
            "AWS_LAMBDA_FUNCTION"
        );
    }
}
