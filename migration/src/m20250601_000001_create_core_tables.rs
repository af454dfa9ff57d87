use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create roles table (site-wide permission tiers)
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null())
                    .col(ColumnDef::new(Roles::PermissionsId).integer().not_null().default(100))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::IsAdmin).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::IsWebAdmin).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::IsPremium).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::PremiumEndsAt).big_integer().null())
                    .col(ColumnDef::new(Users::RoleId).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::DateCreated).big_integer().not_null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().not_null())
                    .col(ColumnDef::new(Users::Notes).string().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        // Create groups table
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Groups::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::OwnerId).string().not_null())
                    .col(ColumnDef::new(Groups::DateCreated).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_owner_id")
                            .from(Groups::Table, Groups::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create group_members table
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupMembers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(GroupMembers::GroupId).string().not_null())
                    .col(ColumnDef::new(GroupMembers::UserId).string().not_null())
                    .col(ColumnDef::new(GroupMembers::DateJoined).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_group_id")
                            .from(GroupMembers::Table, GroupMembers::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_user_id")
                            .from(GroupMembers::Table, GroupMembers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_members_group_user")
                    .table(GroupMembers::Table)
                    .col(GroupMembers::GroupId)
                    .col(GroupMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create group_member_roles table
        manager
            .create_table(
                Table::create()
                    .table(GroupMemberRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupMemberRoles::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(GroupMemberRoles::GroupId).string().not_null())
                    .col(ColumnDef::new(GroupMemberRoles::UserId).string().not_null())
                    .col(ColumnDef::new(GroupMemberRoles::Role).string().not_null().default("member"))
                    .col(ColumnDef::new(GroupMemberRoles::DateAssigned).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_member_roles_group_id")
                            .from(GroupMemberRoles::Table, GroupMemberRoles::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_member_roles_user_id")
                            .from(GroupMemberRoles::Table, GroupMemberRoles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_member_roles_group_user")
                    .table(GroupMemberRoles::Table)
                    .col(GroupMemberRoles::GroupId)
                    .col(GroupMemberRoles::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create properties table
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Properties::PropertyId).string().not_null().primary_key())
                    .col(ColumnDef::new(Properties::GroupId).string().not_null())
                    .col(ColumnDef::new(Properties::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Properties::Name).string().not_null())
                    .col(ColumnDef::new(Properties::Address).string().not_null())
                    .col(ColumnDef::new(Properties::IsRented).boolean().not_null().default(false))
                    .col(ColumnDef::new(Properties::PricePerDay).integer().not_null())
                    .col(ColumnDef::new(Properties::Size).integer().not_null().default(0))
                    .col(ColumnDef::new(Properties::Rooms).integer().not_null().default(1))
                    .col(ColumnDef::new(Properties::Loan).integer().not_null().default(0))
                    .col(ColumnDef::new(Properties::PropertyBuyPrice).integer().not_null().default(0))
                    .col(ColumnDef::new(Properties::PropertySellPriceNow).integer().not_null().default(0))
                    .col(ColumnDef::new(Properties::DateCreated).big_integer().not_null())
                    .col(ColumnDef::new(Properties::LastDateRented).big_integer().not_null())
                    .col(ColumnDef::new(Properties::LastDayCleaned).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_group_id")
                            .from(Properties::Table, Properties::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_created_by")
                            .from(Properties::Table, Properties::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_group_id")
                    .table(Properties::Table)
                    .col(Properties::GroupId)
                    .to_owned(),
            )
            .await?;

        // Create group_property_permissions table
        manager
            .create_table(
                Table::create()
                    .table(GroupPropertyPermissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupPropertyPermissions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(GroupPropertyPermissions::PropertyId).string().not_null())
                    .col(ColumnDef::new(GroupPropertyPermissions::GroupId).string().not_null())
                    .col(ColumnDef::new(GroupPropertyPermissions::DateCreated).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_property_permissions_property_id")
                            .from(GroupPropertyPermissions::Table, GroupPropertyPermissions::PropertyId)
                            .to(Properties::Table, Properties::PropertyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_property_permissions_group_id")
                            .from(GroupPropertyPermissions::Table, GroupPropertyPermissions::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create guests table
        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guests::GuestId).string().not_null().primary_key())
                    .col(ColumnDef::new(Guests::GroupId).string().not_null())
                    .col(ColumnDef::new(Guests::FirstName).string().not_null())
                    .col(ColumnDef::new(Guests::LastName).string().not_null())
                    .col(ColumnDef::new(Guests::Email).string().null())
                    .col(ColumnDef::new(Guests::Phone).string().null())
                    .col(ColumnDef::new(Guests::Nationality).string().null())
                    .col(ColumnDef::new(Guests::DateOfBirth).date().null())
                    .col(ColumnDef::new(Guests::IdNumber).string().null())
                    .col(ColumnDef::new(Guests::IdType).string().null())
                    .col(ColumnDef::new(Guests::Notes).string().null())
                    .col(ColumnDef::new(Guests::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Guests::CreatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_group_id")
                            .from(Guests::Table, Guests::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create stays table
        manager
            .create_table(
                Table::create()
                    .table(Stays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stays::StayId).string().not_null().primary_key())
                    .col(ColumnDef::new(Stays::PropertyId).string().not_null())
                    .col(ColumnDef::new(Stays::GuestId).string().not_null())
                    .col(ColumnDef::new(Stays::CheckIn).date().not_null())
                    .col(ColumnDef::new(Stays::CheckOut).date().not_null())
                    .col(ColumnDef::new(Stays::TotalPrice).integer().not_null())
                    .col(ColumnDef::new(Stays::Status).string().not_null().default("upcoming"))
                    .col(ColumnDef::new(Stays::PaymentStatus).string().not_null().default("pending"))
                    .col(ColumnDef::new(Stays::NumberOfGuests).integer().not_null().default(1))
                    .col(ColumnDef::new(Stays::SpecialRequests).string().null())
                    .col(ColumnDef::new(Stays::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Stays::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Stays::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_property_id")
                            .from(Stays::Table, Stays::PropertyId)
                            .to(Properties::Table, Properties::PropertyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_guest_id")
                            .from(Stays::Table, Stays::GuestId)
                            .to(Guests::Table, Guests::GuestId),
                    )
                    .to_owned(),
            )
            .await?;

        // Conflict lookups filter on property and status
        manager
            .create_index(
                Index::create()
                    .name("idx_stays_property_status")
                    .table(Stays::Table)
                    .col(Stays::PropertyId)
                    .col(Stays::Status)
                    .to_owned(),
            )
            .await?;

        // Create cleaning_notifications table
        manager
            .create_table(
                Table::create()
                    .table(CleaningNotifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CleaningNotifications::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(CleaningNotifications::PropertyId).string().not_null())
                    .col(ColumnDef::new(CleaningNotifications::AssignedTo).string().not_null())
                    .col(ColumnDef::new(CleaningNotifications::StayId).string().null())
                    .col(ColumnDef::new(CleaningNotifications::Status).string().not_null().default("pending"))
                    .col(ColumnDef::new(CleaningNotifications::ScheduledDate).date().not_null())
                    .col(ColumnDef::new(CleaningNotifications::CompletedDate).big_integer().null())
                    .col(ColumnDef::new(CleaningNotifications::Notes).string().null())
                    .col(ColumnDef::new(CleaningNotifications::CreatedBy).string().not_null())
                    .col(ColumnDef::new(CleaningNotifications::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(CleaningNotifications::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cleaning_notifications_property_id")
                            .from(CleaningNotifications::Table, CleaningNotifications::PropertyId)
                            .to(Properties::Table, Properties::PropertyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cleaning_notifications_assigned_to")
                            .from(CleaningNotifications::Table, CleaningNotifications::AssignedTo)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cleaning_notifications_stay_id")
                            .from(CleaningNotifications::Table, CleaningNotifications::StayId)
                            .to(Stays::Table, Stays::StayId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cleaning_notifications_assigned_to")
                    .table(CleaningNotifications::Table)
                    .col(CleaningNotifications::AssignedTo)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CleaningNotifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupPropertyPermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupMemberRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    IsActive,
    IsAdmin,
    IsWebAdmin,
    IsPremium,
    PremiumEndsAt,
    RoleId,
    DateCreated,
    LastLogin,
    Notes,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    PermissionsId,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    Name,
    OwnerId,
    DateCreated,
}

#[derive(Iden)]
enum GroupMembers {
    Table,
    Id,
    GroupId,
    UserId,
    DateJoined,
}

#[derive(Iden)]
enum GroupMemberRoles {
    Table,
    Id,
    GroupId,
    UserId,
    Role,
    DateAssigned,
}

#[derive(Iden)]
enum Properties {
    Table,
    PropertyId,
    GroupId,
    CreatedBy,
    Name,
    Address,
    IsRented,
    PricePerDay,
    Size,
    Rooms,
    Loan,
    PropertyBuyPrice,
    PropertySellPriceNow,
    DateCreated,
    LastDateRented,
    LastDayCleaned,
}

#[derive(Iden)]
enum GroupPropertyPermissions {
    Table,
    Id,
    PropertyId,
    GroupId,
    DateCreated,
}

#[derive(Iden)]
enum Guests {
    Table,
    GuestId,
    GroupId,
    FirstName,
    LastName,
    Email,
    Phone,
    Nationality,
    DateOfBirth,
    IdNumber,
    IdType,
    Notes,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Stays {
    Table,
    StayId,
    PropertyId,
    GuestId,
    CheckIn,
    CheckOut,
    TotalPrice,
    Status,
    PaymentStatus,
    NumberOfGuests,
    SpecialRequests,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CleaningNotifications {
    Table,
    Id,
    PropertyId,
    AssignedTo,
    StayId,
    Status,
    ScheduledDate,
    CompletedDate,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
