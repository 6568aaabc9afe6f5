use chrono::{Duration, NaiveDate, Utc};

use crate::campaign::{Campaign, CampaignId, CampaignStatus, Channel};
use crate::project::{Project, ProjectId, ProjectStatus, ProjectType};
use crate::team::{MemberId, MemberRole, MemberStatus, TeamMember};
use crate::user::{Role, User, UserId};

pub const ADMIN_ID: UserId = UserId::from_u128(0x3d5c_6a8e_0f2b_4c71_9a4e_1b7d_2c90_0001);
pub const MANAGER_ID: UserId = UserId::from_u128(0x3d5c_6a8e_0f2b_4c71_9a4e_1b7d_2c90_0002);

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid seed date")
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: ADMIN_ID,
            name: "Admin User".to_string(),
            email: "admin@company.com".to_string(),
            role: Role::Admin,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=admin".to_string()),
        },
        User {
            id: MANAGER_ID,
            name: "Marketing Manager".to_string(),
            email: "manager@company.com".to_string(),
            role: Role::Viewer,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=manager".to_string()),
        },
    ]
}

pub fn projects() -> Vec<Project> {
    let now = Utc::now();
    let project = |n: u128,
                   name: &str,
                   description: &str,
                   status: ProjectStatus,
                   project_type: ProjectType,
                   campaign_count: u32,
                   total_budget: u64,
                   idle: Duration,
                   created_at: &str,
                   owner: &str| Project {
        id: ProjectId::from_u128(0x9b1e_44d2_7c3a_4f08_b6e5_52a1_0d7f_0000 + n),
        name: name.to_string(),
        description: description.to_string(),
        status,
        project_type,
        campaign_count,
        total_budget,
        last_activity: now - idle,
        created_at: date(created_at),
        owner: owner.to_string(),
        avatar: None,
    };

    vec![
        project(
            1,
            "E-commerce Growth",
            "Complete marketing analytics for our online store, tracking conversions, revenue, and customer acquisition across all channels.",
            ProjectStatus::Active,
            ProjectType::ECommerce,
            12,
            85000,
            Duration::hours(2),
            "2024-01-15",
            "Sarah Chen",
        ),
        project(
            2,
            "SaaS Launch Campaign",
            "Product launch analytics for our new SaaS platform, focusing on trial conversions and user acquisition metrics.",
            ProjectStatus::Active,
            ProjectType::Saas,
            8,
            45000,
            Duration::days(1),
            "2024-02-01",
            "Mike Johnson",
        ),
        project(
            3,
            "Lead Generation Hub",
            "B2B lead generation campaign analytics, tracking MQLs, SQLs, and conversion rates across LinkedIn, Google, and email campaigns.",
            ProjectStatus::Active,
            ProjectType::LeadGen,
            6,
            32000,
            Duration::hours(3),
            "2024-01-28",
            "Emily Rodriguez",
        ),
        project(
            4,
            "Brand Awareness Q1",
            "Brand awareness campaign analysis for Q1, measuring reach, engagement, and brand sentiment across social media channels.",
            ProjectStatus::Completed,
            ProjectType::Brand,
            15,
            125000,
            Duration::weeks(1),
            "2024-01-01",
            "David Kim",
        ),
        project(
            5,
            "Mobile App Install",
            "Mobile app install campaign tracking with focus on cost per install, retention rates, and in-app conversion metrics.",
            ProjectStatus::Paused,
            ProjectType::MobileApp,
            9,
            28000,
            Duration::days(5),
            "2024-02-10",
            "Lisa Zhang",
        ),
        project(
            6,
            "Holiday Campaign 2024",
            "Seasonal marketing analytics for holiday campaigns, tracking performance across Black Friday, Cyber Monday, and Christmas promotions.",
            ProjectStatus::Active,
            ProjectType::ECommerce,
            18,
            95000,
            Duration::minutes(30),
            "2024-02-15",
            "Alex Thompson",
        ),
    ]
}

pub fn campaigns() -> Vec<Campaign> {
    let now = Utc::now();
    let campaign = |n: u128,
                    name: &str,
                    status: CampaignStatus,
                    channel: Channel,
                    [budget, spent, target, achieved, clicks]: [u64; 5],
                    start_date: &str,
                    end_date: &str| Campaign {
        id: CampaignId::from_u128(0x51f0_8c27_e9d4_4b3a_a1c6_7e28_f3b5_0000 + n),
        name: name.to_string(),
        status,
        channel: Some(channel),
        budget,
        spent,
        target,
        achieved,
        // every seeded conversion counts toward the target
        conversions: achieved,
        clicks,
        start_date: Some(date(start_date)),
        end_date: Some(date(end_date)),
        created_at: now,
        modified_at: now,
    };

    vec![
        campaign(
            1,
            "Holiday Shopping Campaign",
            CampaignStatus::Active,
            Channel::Search,
            [50000, 42000, 1000, 1150, 23400],
            "2024-01-15",
            "2024-02-15",
        ),
        campaign(
            2,
            "Q1 Brand Awareness",
            CampaignStatus::Completed,
            Channel::Social,
            [35000, 33500, 750, 692, 18200],
            "2024-01-01",
            "2024-01-31",
        ),
        campaign(
            3,
            "Product Launch Campaign",
            CampaignStatus::Active,
            Channel::Video,
            [75000, 45000, 1500, 1280, 31500],
            "2024-02-01",
            "2024-03-01",
        ),
        campaign(
            4,
            "Retargeting Campaign",
            CampaignStatus::Paused,
            Channel::Display,
            [25000, 18000, 500, 420, 8900],
            "2024-01-20",
            "2024-02-20",
        ),
        campaign(
            5,
            "Summer Promo Campaign",
            CampaignStatus::Active,
            Channel::Email,
            [60000, 28000, 1200, 980, 19600],
            "2024-02-10",
            "2024-03-10",
        ),
        campaign(
            6,
            "Mobile App Install",
            CampaignStatus::Completed,
            Channel::Social,
            [40000, 39200, 800, 856, 16800],
            "2024-01-05",
            "2024-02-05",
        ),
    ]
}

pub fn team_members() -> Vec<TeamMember> {
    let member = |n: u128,
                  name: &str,
                  email: &str,
                  role: MemberRole,
                  last_login: &str,
                  projects: &[&str],
                  phone: &str,
                  department: &str,
                  join_date: &str| TeamMember {
        id: MemberId::from_u128(0x7a2c_19e4_d3b8_4e61_8f05_c4a9_6e13_0000 + n),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status: MemberStatus::Active,
        last_login: Some(date(last_login)),
        projects: projects.iter().map(|project| project.to_string()).collect(),
        phone: Some(phone.to_string()),
        department: Some(department.to_string()),
        join_date: date(join_date),
    };

    vec![
        member(
            1,
            "John Smith",
            "john.smith@company.com",
            MemberRole::Admin,
            "2024-01-15",
            &["E-commerce Q1", "Brand Campaign", "Mobile App Launch"],
            "+1 (555) 123-4567",
            "Marketing",
            "2023-06-15",
        ),
        member(
            2,
            "Sarah Johnson",
            "sarah.johnson@company.com",
            MemberRole::Manager,
            "2024-01-14",
            &["E-commerce Q1", "SaaS Growth"],
            "+1 (555) 234-5678",
            "Marketing",
            "2023-08-20",
        ),
        member(
            3,
            "Mike Chen",
            "mike.chen@company.com",
            MemberRole::Analyst,
            "2024-01-13",
            &["Brand Campaign"],
            "+1 (555) 345-6789",
            "Analytics",
            "2023-09-10",
        ),
    ]
}
